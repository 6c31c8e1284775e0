//! Corridor console: a free-running random-walk telemetry feed for the
//! cold-chain corridor view. Unlike the story engine it carries state from
//! step to step, but the walk is seeded so a given seed replays exactly.

use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::{
    CORRIDOR_LOG_LINES, CORRIDOR_PACKET_START, CORRIDOR_REMAINING_KM, CORRIDOR_TOWN_SPEED_LIMIT,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Telemetry {
    pub speed: f64,       // km/h
    pub cargo_temp: f64,  // °C
    pub cpu_temp: f64,    // °C
    pub lora_signal: f64, // dBm
    pub npu_load: f64,    // %
}

pub const BASE_TELEMETRY: Telemetry = Telemetry {
    speed: 62.0,
    cargo_temp: 2.4,
    cpu_temp: 53.0,
    lora_signal: -92.0,
    npu_load: 41.0,
};

/// Per-step jitter and clamp for one telemetry field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkBounds {
    pub max_delta: f64,
    pub min: f64,
    pub max: f64,
}

impl WalkBounds {
    const fn new(max_delta: f64, min: f64, max: f64) -> Self {
        Self { max_delta, min, max }
    }
}

pub const SPEED_WALK: WalkBounds = WalkBounds::new(6.0, 22.0, 86.0);
pub const CARGO_TEMP_WALK: WalkBounds = WalkBounds::new(0.35, 1.2, 4.35);
pub const CPU_TEMP_WALK: WalkBounds = WalkBounds::new(0.9, 45.0, 74.0);
pub const LORA_WALK: WalkBounds = WalkBounds::new(2.8, -110.0, -70.0);
pub const NPU_WALK: WalkBounds = WalkBounds::new(7.0, 12.0, 92.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CargoRisk {
    Safe,
    Rising,
    Freezing,
}

impl CargoRisk {
    pub fn from_temp(cargo_temp: f64) -> Self {
        if cargo_temp > 3.5 {
            CargoRisk::Rising
        } else if cargo_temp < 1.8 {
            CargoRisk::Freezing
        } else {
            CargoRisk::Safe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CargoRisk::Safe => "En rango seguro",
            CargoRisk::Rising => "Alerta: subiendo",
            CargoRisk::Freezing => "Alerta: por congelar",
        }
    }
}

/// Figures derived from the latest telemetry for the narrative panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorSummary {
    pub hours_to_destination: f64,
    pub fuel_efficiency: f64,
    pub compliance_score: f64,
    pub cargo_risk: CargoRisk,
}

impl CorridorSummary {
    pub fn from_telemetry(t: &Telemetry) -> Self {
        let compliance_penalty = ((t.speed - CORRIDOR_TOWN_SPEED_LIMIT) * 2.6).max(0.0);
        Self {
            hours_to_destination: (CORRIDOR_REMAINING_KM / t.speed.max(12.0)).clamp(2.6, 12.0),
            fuel_efficiency: (28.0 - t.speed * 0.08 + t.npu_load * 0.05).clamp(18.0, 33.0),
            compliance_score: (100.0 - compliance_penalty).clamp(0.0, 100.0),
            cargo_risk: CargoRisk::from_temp(t.cargo_temp),
        }
    }
}

/// Status shown for the digital geofence on the silent stretch.
pub const GEOFENCE_STATUS: &str = "ACTIVA";

/// Which audience the console is speaking to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Operations: time to destination, fuel and cargo.
    #[default]
    Corporate,
    /// Community: speed, geofence and compliance.
    Community,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Corporate => "Operación",
            ViewMode::Community => "Comunidad",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            ViewMode::Corporate => "Tiempo / Combustible / Carga",
            ViewMode::Community => "Velocidad / Geocerca / Comunidad",
        }
    }
}

/// Outcome of pressing the mode toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeChange {
    /// Applied at once.
    Immediate(ViewMode),
    /// Waits behind the ledger overlay; call [`ModeSwitch::complete`] when
    /// the delay has elapsed.
    Deferred(ViewMode),
    /// A deferred switch is already in flight.
    Ignored,
}

/// Corporate/community toggle. Leaving corporate goes through a pending
/// state while the ledger overlay is shown; going back is immediate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeSwitch {
    current: ViewMode,
    pending: Option<ViewMode>,
}

impl ModeSwitch {
    #[inline]
    pub fn current(&self) -> ViewMode {
        self.current
    }

    #[inline]
    pub fn pending(&self) -> Option<ViewMode> {
        self.pending
    }

    /// The overlay is up for as long as a switch is pending.
    #[inline]
    pub fn overlay_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub fn toggle(&mut self) -> ModeChange {
        if self.pending.is_some() {
            return ModeChange::Ignored;
        }
        match self.current {
            ViewMode::Corporate => {
                self.pending = Some(ViewMode::Community);
                ModeChange::Deferred(ViewMode::Community)
            }
            ViewMode::Community => {
                self.current = ViewMode::Corporate;
                ModeChange::Immediate(ViewMode::Corporate)
            }
        }
    }

    /// Land a deferred switch. Returns the new mode, or `None` when nothing
    /// was pending.
    pub fn complete(&mut self) -> Option<ViewMode> {
        let next = self.pending.take()?;
        self.current = next;
        Some(next)
    }
}

/// Wall-clock stamp for a log line; supplied by the caller so the walk stays
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

pub struct CorridorFeed {
    rng: StdRng,
    telemetry: Telemetry,
    packet: u64,
    lines: SmallVec<[String; CORRIDOR_LOG_LINES]>,
}

impl CorridorFeed {
    pub fn new(seed: u64) -> Self {
        let lines = [
            "> [12:00:00] QORI NODE v1.1: perfil Ransa Cold Chain cargado.",
            "> [12:00:01] 4G no disponible. Handshake malla LoRa listo.",
            "> [12:00:02] Ruta 30B marcada como Zona de Silencio. Geocerca armada.",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();
        Self {
            rng: StdRng::seed_from_u64(seed),
            telemetry: BASE_TELEMETRY,
            packet: CORRIDOR_PACKET_START,
            lines,
        }
    }

    #[inline]
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    #[inline]
    pub fn packet(&self) -> u64 {
        self.packet
    }

    /// Newest first.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn summary(&self) -> CorridorSummary {
        CorridorSummary::from_telemetry(&self.telemetry)
    }

    fn walk(&mut self, value: f64, bounds: WalkBounds) -> f64 {
        let delta = (self.rng.gen::<f64>() * 2.0 - 1.0) * bounds.max_delta;
        (value + delta).clamp(bounds.min, bounds.max)
    }

    /// Advance the feed by one step and return the new telemetry.
    pub fn step(&mut self, now: ClockTime) -> Telemetry {
        let prev = self.telemetry;
        let next = Telemetry {
            speed: self.walk(prev.speed, SPEED_WALK),
            cargo_temp: self.walk(prev.cargo_temp, CARGO_TEMP_WALK),
            cpu_temp: self.walk(prev.cpu_temp, CPU_TEMP_WALK),
            lora_signal: self.walk(prev.lora_signal, LORA_WALK),
            npu_load: self.walk(prev.npu_load, NPU_WALK),
        };
        self.telemetry = next;
        self.packet += self.rng.gen_range(1..=4);

        let line = format!(
            "> [{:02}:{:02}:{:02}] Ruta 30B · pkt #{} · vel={:.1} km/h · carga={:.2}°C",
            now.hours, now.minutes, now.seconds, self.packet, next.speed, next.cargo_temp
        );
        self.lines.insert(0, line);
        self.lines.truncate(CORRIDOR_LOG_LINES);
        next
    }
}
