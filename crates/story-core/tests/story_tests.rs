// Host-side tests for the story clock, phase schedule, metrics and log.

use story_core::*;

fn engine(id: ScenarioId) -> StoryEngine {
    StoryEngine::builtin(id).expect("builtin scenario should build")
}

#[test]
fn clock_wraps_after_last_second() {
    let mut clock = StoryClock::new(60).unwrap();
    for expected in 1..60 {
        let tick = clock.tick();
        assert_eq!(tick.seconds, expected);
        assert!(!tick.wrapped);
    }
    let tick = clock.tick();
    assert_eq!(tick, Tick { seconds: 0, wrapped: true });
}

#[test]
fn clock_rejects_zero_loop() {
    assert_eq!(StoryClock::new(0).unwrap_err(), StoryError::ZeroLoopDuration);
}

#[test]
fn journey_progress_is_clamped_fraction() {
    assert_eq!(journey_progress(0, 60), 0.0);
    assert!((journey_progress(30, 60) - 0.5).abs() < 1e-12);
    assert_eq!(journey_progress(90, 60), 1.0);
}

#[test]
fn noise_is_deterministic_and_bounded() {
    for seed in 0..500 {
        let a = noise(seed as f64, 3.0);
        let b = noise(seed as f64, 3.0);
        assert_eq!(a.to_bits(), b.to_bits(), "seed {seed} not reproducible");
        assert!((-1.5..1.5).contains(&a), "seed {seed} out of range: {a}");
    }
    assert_eq!(noise(7.0, 0.0), 0.0);
}

#[test]
fn noise_matches_sin_fract_formula() {
    let seed = 17.0_f64;
    let x = (seed * 12.9898).sin() * 43758.5453;
    let expected = (x - x.floor() - 0.5) * 2.0;
    assert_eq!(noise(seed, 2.0).to_bits(), expected.to_bits());
}

#[test]
fn cold_chain_phases_use_half_open_thresholds() {
    let e = engine(ScenarioId::ColdChain);
    assert_eq!(e.phase_at(0), Phase::Normal);
    assert_eq!(e.phase_at(11), Phase::Normal);
    assert_eq!(e.phase_at(12), Phase::Blind);
    assert_eq!(e.phase_at(14), Phase::Blind);
    assert_eq!(e.phase_at(15), Phase::Incident);
    assert_eq!(e.phase_at(59), Phase::Incident);
}

#[test]
fn phases_never_regress_within_a_loop() {
    for id in ScenarioId::ALL {
        let e = engine(id);
        let mut prev = e.phase_at(0);
        for s in 1..e.scenario().loop_seconds {
            let p = e.phase_at(s);
            assert!(p >= prev, "{id}: {prev:?} -> {p:?} at {s}s");
            prev = p;
        }
    }
}

#[test]
fn schedule_rejects_regressing_or_unordered_thresholds() {
    let err = PhaseSchedule::new(vec![(15, Phase::Incident), (45, Phase::Normal)], Phase::Recovery)
        .unwrap_err();
    assert!(matches!(err, StoryError::RegressingPhase { .. }));

    let err = PhaseSchedule::new(vec![(15, Phase::Normal), (10, Phase::Blind)], Phase::Incident)
        .unwrap_err();
    assert_eq!(err, StoryError::UnorderedThresholds { previous: 15, next: 10 });
}

#[test]
fn schedule_reports_phase_start() {
    let schedule =
        PhaseSchedule::new(vec![(12, Phase::Normal), (15, Phase::Blind)], Phase::Incident).unwrap();
    assert_eq!(schedule.start_of(Phase::Normal), Some(0));
    assert_eq!(schedule.start_of(Phase::Blind), Some(12));
    assert_eq!(schedule.start_of(Phase::Incident), Some(15));
    assert_eq!(schedule.start_of(Phase::Recovery), None);
}

#[test]
fn every_metric_stays_in_declared_range() {
    for id in ScenarioId::ALL {
        let e = engine(id);
        for s in 0..e.scenario().loop_seconds {
            for (spec, reading) in e.scenario().metrics.iter().zip(e.metrics_at(s)) {
                assert!(
                    reading.value >= spec.min && reading.value <= spec.max,
                    "{id}/{} = {} at {s}s outside [{}, {}]",
                    spec.key,
                    reading.value,
                    spec.min,
                    spec.max
                );
            }
        }
    }
}

#[test]
fn metrics_are_reproducible_across_engines() {
    let a = engine(ScenarioId::Rainforest);
    let b = engine(ScenarioId::Rainforest);
    for s in 0..60 {
        let ma = a.metrics_at(s);
        let mb = b.metrics_at(s);
        for (x, y) in ma.iter().zip(&mb) {
            assert_eq!(x.value.to_bits(), y.value.to_bits());
        }
    }
}

#[test]
fn cold_chain_temperature_spikes_then_settles() {
    let e = engine(ScenarioId::ColdChain);
    let temp = |s: u32| e.frame_at(s).metric("cargo_temp").unwrap().value;

    // calm: 2.0 ± 0.05
    assert!((temp(5) - 2.0).abs() <= 0.05 + 1e-9);
    // blind: 2.2 ± 0.05
    assert!((temp(13) - 2.2).abs() <= 0.05 + 1e-9);
    // right after the incident starts the value sits near the 4.8 spike
    assert!((temp(15) - 4.8).abs() <= 0.05 + 1e-9);
    // by the end of the settle window it rests near 3.5
    assert!((temp(50) - 3.5).abs() <= 0.05 + 1e-9);
}

#[test]
fn alert_overrides_silent_zone_for_speed() {
    let e = engine(ScenarioId::ColdChain);
    let speed = e.frame_at(30).metric("speed").unwrap().value;
    assert!((speed - 25.0).abs() <= 1.0 + 1e-9);
    let calm = e.frame_at(3).metric("speed").unwrap().value;
    assert!((calm - 65.0).abs() <= 1.0 + 1e-9);
}

#[test]
fn rainforest_acoustic_drops_in_zone_before_alert() {
    // Zone-only targets need a script where the zone is reached without the alert.
    let mut scenario = Scenario::builtin(ScenarioId::Rainforest).unwrap();
    scenario.alert = Window::between(100, 101);
    let e = StoryEngine::new(scenario).unwrap();
    let db = e.frame_at(30).metric("acoustic_db").unwrap().value;
    assert!((db - 42.0).abs() <= 1.25 + 1e-9);
}

#[test]
fn mining_brake_ramps_then_cools_without_noise() {
    let e = engine(ScenarioId::Mining);
    let brake = |s: u32| e.frame_at(s).metric("brake_temp").unwrap().value;
    assert!((brake(10) - 320.0).abs() <= 5.0 + 1e-9);
    assert!((brake(28) - 600.0).abs() <= 7.5 + 1e-9);
    assert_eq!(brake(50), 350.0);
    assert_eq!(brake(59), 260.0);
}

#[test]
fn mining_signals_follow_their_own_windows() {
    let e = engine(ScenarioId::Mining);
    let f = e.frame_at(16);
    assert!(f.offline && !f.alert);
    let f = e.frame_at(20);
    assert!(f.offline && f.alert);
    let f = e.frame_at(42);
    assert!(f.offline && !f.alert);
    assert_eq!(f.phase, Phase::Incident);
    let f = e.frame_at(50);
    assert!(!f.offline && !f.alert);
    assert_eq!(f.phase, Phase::Recovery);
}

#[test]
fn mining_windows_are_half_open_at_every_edge() {
    let e = engine(ScenarioId::Mining);
    let ctx = |s: u32| e.context_at(s);
    // offline [15, 45)
    assert!(!ctx(14).offline);
    assert!(ctx(15).offline);
    assert!(ctx(44).offline);
    assert!(!ctx(45).offline);
    // alert [18, 40)
    assert!(!ctx(17).alert);
    assert!(ctx(18).alert);
    assert!(ctx(39).alert);
    assert!(!ctx(40).alert);
    // phase thresholds
    assert_eq!(ctx(14).phase, Phase::Normal);
    assert_eq!(ctx(15).phase, Phase::Incident);
    assert_eq!(ctx(44).phase, Phase::Incident);
    assert_eq!(ctx(45).phase, Phase::Recovery);
}

#[test]
fn silent_zone_includes_both_ends() {
    let zone = Scenario::builtin(ScenarioId::ColdChain).unwrap().silent_zone;
    assert_eq!(zone, Zone { start: 0.42, end: 0.72 });
    assert!(zone.contains(0.42));
    assert!(zone.contains(0.72));
    assert!(!zone.contains(0.42 - 1e-9));
    assert!(!zone.contains(0.72 + 1e-9));

    // mining zone 0.40..=0.75 lands on whole seconds: 24 and 45 of 60
    let e = engine(ScenarioId::Mining);
    assert!(!e.context_at(23).in_zone);
    assert!(e.context_at(24).in_zone);
    assert!(e.context_at(45).in_zone);
    assert!(!e.context_at(46).in_zone);
}

#[test]
fn merged_log_interleaves_user_entries_by_time() {
    const SCRIPT: &[ScriptedEntry] = &[
        ScriptedEntry::new(12, "a", LogKind::Warning),
        ScriptedEntry::new(15, "b", LogKind::Error),
        ScriptedEntry::new(22, "c", LogKind::Action),
    ];
    let mut book = LogBook::new();
    book.submit("operator note", 14).unwrap();

    let lines = book.merged(SCRIPT, 20);
    let stamps: Vec<(u32, LogKind)> = lines.iter().map(|l| (l.at, l.kind)).collect();
    assert_eq!(
        stamps,
        vec![(12, LogKind::Warning), (14, LogKind::User), (15, LogKind::Error)]
    );
    assert_eq!(lines[1].message, "operator note");
}

#[test]
fn equal_timestamps_keep_script_before_user() {
    const SCRIPT: &[ScriptedEntry] = &[ScriptedEntry::new(12, "script", LogKind::Info)];
    let mut book = LogBook::new();
    let first = book.submit("first", 12).unwrap();
    let second = book.submit("second", 12).unwrap();
    let lines = book.merged(SCRIPT, 12);
    assert_eq!(lines[0].source, LogSource::System);
    assert_eq!(lines[1].source, LogSource::User(first));
    assert_eq!(lines[2].source, LogSource::User(second));
}

#[test]
fn blank_submissions_are_refused_and_text_is_trimmed() {
    let mut book = LogBook::new();
    assert_eq!(book.submit("   \n\t", 3), Err(LogError::EmptyMessage));
    assert!(book.is_empty());
    book.submit("  hola  ", 3).unwrap();
    assert_eq!(book.entries()[0].message, "hola");
}

#[test]
fn wrap_to_zero_clears_operator_log() {
    let mut e = engine(ScenarioId::ColdChain);
    for _ in 0..14 {
        e.tick();
    }
    e.submit("check compressor").unwrap();
    assert_eq!(e.log().entries().len(), 1);

    while e.seconds() != 59 {
        e.tick();
    }
    assert_eq!(e.log().entries().len(), 1);
    let tick = e.tick();
    assert!(tick.wrapped);
    assert!(e.log().is_empty());
    assert!(e.frame().logs.is_empty());
}

#[test]
fn scripted_lines_appear_as_the_clock_advances() {
    let e = engine(ScenarioId::ColdChain);
    assert!(e.frame_at(11).logs.is_empty());
    assert_eq!(e.frame_at(12).logs.len(), 1);
    assert_eq!(e.frame_at(20).logs.len(), 5);
    assert_eq!(e.frame_at(59).logs.len(), e.scenario().script.len());
}

#[test]
fn unknown_scenario_slug_is_an_error() {
    assert_eq!("mining".parse::<ScenarioId>().unwrap(), ScenarioId::Mining);
    assert_eq!(" Cold-Chain ".parse::<ScenarioId>().unwrap(), ScenarioId::ColdChain);
    assert_eq!(
        "volcano".parse::<ScenarioId>().unwrap_err(),
        StoryError::UnknownScenario("volcano".into())
    );
}

#[test]
fn metric_without_rules_fails_validation() {
    let mut scenario = Scenario::builtin(ScenarioId::Glacial).unwrap();
    scenario.metrics[0].rules.clear();
    assert!(matches!(
        StoryEngine::new(scenario).err(),
        Some(StoryError::EmptyRules { key: "pressure" })
    ));
}

#[test]
fn incident_window_cannot_open_before_the_incident_phase() {
    let mut scenario = Scenario::builtin(ScenarioId::ColdChain).unwrap();
    scenario.incident = ProgressWindow::new(10, 20);
    assert_eq!(
        StoryEngine::new(scenario).err(),
        Some(StoryError::IncidentBeforePhase { window_start: 10, phase_start: 15 })
    );
    // mining's spike starts three seconds into its incident phase
    let mining = Scenario::builtin(ScenarioId::Mining).unwrap();
    assert_eq!(mining.phases.start_of(Phase::Incident), Some(15));
    assert_eq!(mining.incident.start, 18);
}
