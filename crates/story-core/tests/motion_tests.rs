// Host-side tests for display easing and the corridor random walk.

use story_core::*;

#[test]
fn easing_presets_hit_endpoints_and_are_monotonic() {
    for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
        assert!(easing.apply(0.0).abs() < 1e-9);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        let mut prev = 0.0;
        for i in 1..=200 {
            let v = easing.apply(i as f64 / 200.0);
            assert!(v + 1e-9 >= prev, "{easing:?} not monotonic at step {i}");
            prev = v;
        }
    }
}

#[test]
fn ease_out_leads_and_ease_in_out_is_symmetric() {
    assert!(Easing::EaseOut.apply(0.5) > 0.5);
    let a = Easing::EaseInOut.apply(0.25);
    let b = Easing::EaseInOut.apply(0.75);
    assert!((a + b - 1.0).abs() < 1e-5);
    assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-5);
}

#[test]
fn tween_runs_from_start_to_target() {
    let tween = Tween {
        from: 10.0,
        to: 20.0,
        start_sec: 1.0,
        duration_sec: METRIC_TWEEN_SEC,
        easing: Easing::EaseOut,
    };
    assert_eq!(tween.value_at(0.5), 10.0);
    assert_eq!(tween.value_at(1.0), 10.0);
    assert!((tween.value_at(1.0 + METRIC_TWEEN_SEC) - 20.0).abs() < 1e-6);
    assert_eq!(tween.value_at(5.0), 20.0);
    assert!(!tween.is_done(1.5));
    assert!(tween.is_done(2.0));
}

#[test]
fn retarget_mid_flight_starts_from_displayed_value() {
    let mut s = Smoothed::new(0.0, 1.0, Easing::Linear);
    s.retarget(10.0, 0.0);
    let shown = s.value(0.5);
    assert!((shown - 5.0).abs() < 1e-9);
    s.retarget(0.0, 0.5);
    assert!((s.value(0.5) - shown).abs() < 1e-9);
    assert_eq!(s.value(1.5), 0.0);
    assert!(s.is_settled(1.5));
}

#[test]
fn jump_skips_the_animation() {
    let mut s = Smoothed::new(0.0, JOURNEY_TWEEN_SEC, Easing::EaseInOut);
    s.retarget(0.9, 0.0);
    s.jump(0.0);
    assert_eq!(s.value(0.1), 0.0);
    assert_eq!(s.target(), 0.0);
}

fn stamp(i: u32) -> ClockTime {
    ClockTime {
        hours: 12,
        minutes: (i / 60) as u8,
        seconds: (i % 60) as u8,
    }
}

#[test]
fn corridor_feed_replays_for_a_seed() {
    let mut a = CorridorFeed::new(42);
    let mut b = CorridorFeed::new(42);
    for i in 0..50 {
        assert_eq!(a.step(stamp(i)), b.step(stamp(i)));
    }
    assert_eq!(a.lines(), b.lines());
    assert_eq!(a.packet(), b.packet());
}

#[test]
fn corridor_walk_respects_clamps_and_packet_growth() {
    let mut feed = CorridorFeed::new(7);
    let mut packet = feed.packet();
    assert_eq!(packet, CORRIDOR_PACKET_START);
    for i in 0..500 {
        let t = feed.step(stamp(i));
        for (value, bounds) in [
            (t.speed, SPEED_WALK),
            (t.cargo_temp, CARGO_TEMP_WALK),
            (t.cpu_temp, CPU_TEMP_WALK),
            (t.lora_signal, LORA_WALK),
            (t.npu_load, NPU_WALK),
        ] {
            assert!(value >= bounds.min && value <= bounds.max);
        }
        let grew = feed.packet() - packet;
        assert!((1..=4).contains(&grew));
        packet = feed.packet();
    }
}

#[test]
fn corridor_log_keeps_six_newest_lines() {
    let mut feed = CorridorFeed::new(1);
    assert_eq!(feed.lines().len(), 3);
    for i in 0..10 {
        feed.step(stamp(i));
    }
    assert_eq!(feed.lines().len(), CORRIDOR_LOG_LINES);
    let newest = &feed.lines()[0];
    assert!(newest.starts_with("> [12:00:09] Ruta 30B · pkt #"));
    assert!(newest.contains(&format!("pkt #{}", feed.packet())));
}

#[test]
fn corridor_summary_formulas() {
    let summary = CorridorSummary::from_telemetry(&BASE_TELEMETRY);
    // 320 / 62
    assert!((summary.hours_to_destination - 320.0 / 62.0).abs() < 1e-9);
    // 28 - 4.96 + 2.05
    assert!((summary.fuel_efficiency - 25.09).abs() < 1e-9);
    // 100 - 32 * 2.6
    assert!((summary.compliance_score - 16.8).abs() < 1e-9);
    assert_eq!(summary.cargo_risk, CargoRisk::Safe);

    assert_eq!(CargoRisk::from_temp(3.6), CargoRisk::Rising);
    assert_eq!(CargoRisk::from_temp(1.7), CargoRisk::Freezing);

    let crawl = Telemetry {
        speed: 5.0,
        ..BASE_TELEMETRY
    };
    let s = CorridorSummary::from_telemetry(&crawl);
    assert_eq!(s.hours_to_destination, 12.0);
    assert_eq!(s.compliance_score, 100.0);
}

#[test]
fn community_view_waits_for_the_ledger_overlay() {
    let mut switch = ModeSwitch::default();
    assert_eq!(switch.current(), ViewMode::Corporate);
    assert!(!switch.overlay_visible());

    assert_eq!(switch.toggle(), ModeChange::Deferred(ViewMode::Community));
    assert_eq!(switch.current(), ViewMode::Corporate);
    assert!(switch.overlay_visible());
    // pressing again while the overlay is up does nothing
    assert_eq!(switch.toggle(), ModeChange::Ignored);
    assert_eq!(switch.pending(), Some(ViewMode::Community));

    assert_eq!(switch.complete(), Some(ViewMode::Community));
    assert_eq!(switch.current(), ViewMode::Community);
    assert!(!switch.overlay_visible());
    assert_eq!(switch.complete(), None);
}

#[test]
fn returning_to_corporate_is_immediate() {
    let mut switch = ModeSwitch::default();
    switch.toggle();
    switch.complete();
    assert_eq!(switch.toggle(), ModeChange::Immediate(ViewMode::Corporate));
    assert_eq!(switch.current(), ViewMode::Corporate);
    assert_eq!(switch.pending(), None);
    assert_eq!(ViewMode::Community.label(), "Comunidad");
    assert_eq!(CORRIDOR_LEDGER_DELAY_MS, 1200);
}
