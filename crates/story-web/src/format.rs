// Pure text and geometry helpers for the dashboard views (no DOM access).

use glam::Vec2;
use story_core::{
    CorridorSummary, LogLine, LogSource, ModeSwitch, Phase, Telemetry, ViewMode, GEOFENCE_STATUS,
};

/// Number rendered with a fixed number of decimals, unit appended when set.
pub fn metric_text(value: f64, decimals: usize, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.decimals$}")
    } else {
        format!("{value:.decimals$} {unit}")
    }
}

/// Header shown above a log message.
pub fn log_header(line: &LogLine<'_>) -> String {
    match line.source {
        LogSource::User(_) => "OPERADOR HUMANO".to_string(),
        LogSource::System => format!("SISTEMA [T+{}s]", line.at),
    }
}

#[inline]
pub fn phase_class(phase: Phase) -> &'static str {
    match phase {
        Phase::Normal => "phase-normal",
        Phase::Blind => "phase-blind",
        Phase::Incident => "phase-incident",
        Phase::Recovery => "phase-recovery",
    }
}

/// Story clock readout, `T+12s / 60s`.
pub fn clock_label(seconds: u32, loop_seconds: u32) -> String {
    format!("T+{seconds}s / {loop_seconds}s")
}

/// Maps route coordinates into canvas pixels, centred and aspect-preserving
/// (the SVG `xMidYMid meet` rule).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl ViewTransform {
    pub fn fit(view: Vec2, canvas: Vec2) -> Self {
        if view.x <= 0.0 || view.y <= 0.0 {
            return Self {
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }
        let scale = (canvas.x / view.x).min(canvas.y / view.y).max(0.0);
        let offset = (canvas - view * scale) * 0.5;
        Self { scale, offset }
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }
}

/// Label/value pairs for the corridor telemetry panel.
pub fn telemetry_rows(t: &Telemetry) -> [(&'static str, String); 5] {
    [
        ("Velocidad", format!("{:.1} km/h", t.speed)),
        ("Temp. carga", format!("{:.2} °C", t.cargo_temp)),
        ("Temp. CPU", format!("{:.1} °C", t.cpu_temp)),
        ("Señal LoRa", format!("{:.0} dBm", t.lora_signal)),
        ("Carga NPU", format!("{:.0} %", t.npu_load)),
    ]
}

/// Narrative rows for the active audience.
pub fn summary_rows(
    s: &CorridorSummary,
    t: &Telemetry,
    mode: ViewMode,
) -> Vec<(&'static str, String)> {
    match mode {
        ViewMode::Corporate => vec![
            ("Tiempo a destino", format!("{:.1} h", s.hours_to_destination)),
            ("Combustible", format!("{:.1} L/100 km", s.fuel_efficiency)),
            ("Temp. carga", format!("{:.2} °C", t.cargo_temp)),
        ],
        ViewMode::Community => vec![
            ("Vel. actual", format!("{:.1} km/h", t.speed)),
            ("Cumplimiento de velocidad", format!("{:.0} %", s.compliance_score)),
            ("Geocerca digital", GEOFENCE_STATUS.to_string()),
            (
                "Temp. carga",
                format!("{:.2} °C · {}", t.cargo_temp, s.cargo_risk.label()),
            ),
        ],
    }
}

/// Text on the mode toggle: the active mode, then the pending one if any.
pub fn mode_toggle_label(switch: &ModeSwitch) -> String {
    match switch.pending() {
        Some(next) => format!("{} → {}", switch.current().label(), next.label()),
        None => switch.current().label().to_string(),
    }
}
