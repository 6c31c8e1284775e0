// Host-side tests for the pure view helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod format {
    include!("../src/format.rs");
}
mod display {
    include!("../src/display.rs");
}

use display::*;
use format::*;
use glam::Vec2;
use story_core::*;

#[test]
fn metric_text_honours_decimals_and_unit() {
    assert_eq!(metric_text(4.8123, 1, "°C"), "4.8 °C");
    assert_eq!(metric_text(384.4, 0, ""), "384");
    assert_eq!(metric_text(-92.0, 2, "dBm"), "-92.00 dBm");
}

#[test]
fn log_headers_distinguish_operator_and_system() {
    let system = LogLine {
        at: 15,
        message: "x",
        kind: LogKind::Error,
        source: LogSource::System,
    };
    let user = LogLine {
        at: 16,
        message: "y",
        kind: LogKind::User,
        source: LogSource::User(0),
    };
    assert_eq!(log_header(&system), "SISTEMA [T+15s]");
    assert_eq!(log_header(&user), "OPERADOR HUMANO");
}

#[test]
fn phase_classes_are_distinct() {
    let classes = [Phase::Normal, Phase::Blind, Phase::Incident, Phase::Recovery].map(phase_class);
    for (i, a) in classes.iter().enumerate() {
        for b in &classes[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(clock_label(12, 60), "T+12s / 60s");
}

#[test]
fn view_transform_letterboxes_wide_canvas() {
    let xf = ViewTransform::fit(Vec2::new(900.0, 580.0), Vec2::new(1800.0, 580.0));
    assert_eq!(xf.scale, 1.0);
    assert_eq!(xf.offset, Vec2::new(450.0, 0.0));
    assert_eq!(xf.apply(Vec2::new(900.0, 580.0)), Vec2::new(1350.0, 580.0));
}

#[test]
fn view_transform_scales_down_tall_canvas() {
    let xf = ViewTransform::fit(Vec2::new(900.0, 600.0), Vec2::new(450.0, 1000.0));
    assert_eq!(xf.scale, 0.5);
    assert_eq!(xf.apply(Vec2::ZERO), Vec2::new(0.0, 350.0));
}

#[test]
fn view_transform_tolerates_empty_view() {
    let xf = ViewTransform::fit(Vec2::ZERO, Vec2::new(100.0, 100.0));
    assert_eq!(xf.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
}

#[test]
fn corridor_rows_use_spanish_labels() {
    let rows = telemetry_rows(&BASE_TELEMETRY);
    assert_eq!(rows[0], ("Velocidad", "62.0 km/h".to_string()));
    assert_eq!(rows[1].1, "2.40 °C");
}

#[test]
fn corporate_rows_show_time_fuel_and_cargo() {
    let summary = CorridorSummary::from_telemetry(&BASE_TELEMETRY);
    let rows = summary_rows(&summary, &BASE_TELEMETRY, ViewMode::Corporate);
    let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, ["Tiempo a destino", "Combustible", "Temp. carga"]);
    assert_eq!(rows[0].1, "5.2 h");
    assert_eq!(rows[1].1, "25.1 L/100 km");
    assert_eq!(rows[2].1, "2.40 °C");
}

#[test]
fn community_rows_show_speed_geofence_and_compliance() {
    let summary = CorridorSummary::from_telemetry(&BASE_TELEMETRY);
    let rows = summary_rows(&summary, &BASE_TELEMETRY, ViewMode::Community);
    assert_eq!(rows[0], ("Vel. actual", "62.0 km/h".to_string()));
    assert_eq!(rows[1], ("Cumplimiento de velocidad", "17 %".to_string()));
    assert_eq!(rows[2], ("Geocerca digital", "ACTIVA".to_string()));
    assert_eq!(rows[3].1, "2.40 °C · En rango seguro");
    assert!(rows.iter().all(|(l, _)| *l != "Combustible"));
}

#[test]
fn toggle_label_shows_the_pending_mode() {
    let mut switch = ModeSwitch::default();
    assert_eq!(mode_toggle_label(&switch), "Operación");
    switch.toggle();
    assert_eq!(mode_toggle_label(&switch), "Operación → Comunidad");
    switch.complete();
    assert_eq!(mode_toggle_label(&switch), "Comunidad");
}

#[test]
fn display_starts_at_frame_values() {
    let engine = StoryEngine::builtin(ScenarioId::ColdChain).unwrap();
    let frame = engine.frame();
    let display = DisplayState::new(&frame, engine.scenario().journey_easing);
    assert_eq!(display.metric(0, 0.0), Some(frame.metrics[0].value));
    assert_eq!(display.journey(0.0), 0.0);
    assert_eq!(display.metric(9, 0.0), None);
    assert!(display.is_settled(JOURNEY_TWEEN_SEC));
}

#[test]
fn display_eases_toward_next_second() {
    let mut engine = StoryEngine::builtin(ScenarioId::Mining).unwrap();
    let mut display = DisplayState::new(&engine.frame(), engine.scenario().journey_easing);
    let tick = engine.tick();
    let frame = engine.frame();
    display.retarget(&frame, tick.wrapped, 10.0);

    assert!(!display.is_settled(10.2));
    let mid = display.journey(10.0 + JOURNEY_TWEEN_SEC / 2.0);
    assert!(mid > 0.0 && mid < frame.journey_progress);
    assert!((display.journey(11.0) - frame.journey_progress).abs() < 1e-9);
    assert!(display.is_settled(11.0));
}

#[test]
fn display_snaps_marker_back_on_wrap() {
    let mut engine = StoryEngine::builtin(ScenarioId::Glacial).unwrap();
    let frame = engine.frame_at(59);
    let mut display = DisplayState::new(&frame, engine.scenario().journey_easing);
    let mut tick = engine.tick();
    while !tick.wrapped {
        tick = engine.tick();
    }
    display.retarget(&engine.frame(), tick.wrapped, 5.0);
    assert_eq!(display.journey(5.0), 0.0);
}
