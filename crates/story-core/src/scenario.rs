//! Built-in demo scripts. Every dashboard runs the same engine; a scenario is
//! pure configuration: thresholds, metric rules, route geometry and the
//! canned log.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::constants::{
    ALERT_SEED_OFFSET, DEFAULT_LOOP_SECONDS, ROUTE_END_MARGIN_PX, SECONDARY_SEED_OFFSET,
};
use crate::ease::Easing;
use crate::error::StoryError;
use crate::event_log::{LogKind, ScriptedEntry};
use crate::metric::{Condition, MetricSpec, ProgressWindow, Rule, Target};
use crate::path::Lookahead;
use crate::phase::{Phase, PhaseSchedule, Window};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    ColdChain,
    Mining,
    Glacial,
    Rainforest,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::ColdChain,
        ScenarioId::Mining,
        ScenarioId::Glacial,
        ScenarioId::Rainforest,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ScenarioId::ColdChain => "cold-chain",
            ScenarioId::Mining => "mining",
            ScenarioId::Glacial => "glacial",
            ScenarioId::Rainforest => "rainforest",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ScenarioId {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StoryError::UnknownScenario(wanted.to_owned()))
    }
}

/// Inclusive journey-progress range where the uplink is shown as lost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub start: f64,
    pub end: f64,
}

impl Zone {
    #[inline]
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress <= self.end
    }
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub loop_seconds: u32,
    pub phases: PhaseSchedule,
    pub offline: Window,
    pub alert: Window,
    /// Span used for `incident_progress` in every frame.
    pub incident: ProgressWindow,
    pub route: &'static str,
    /// Size of the drawing space the route coordinates live in.
    pub view_size: Vec2,
    pub silent_zone: Zone,
    pub lookahead: Lookahead,
    pub end_margin: f32,
    pub journey_easing: Easing,
    pub metrics: Vec<MetricSpec>,
    pub script: &'static [ScriptedEntry],
}

impl Scenario {
    pub fn builtin(id: ScenarioId) -> Result<Self, StoryError> {
        let scenario = match id {
            ScenarioId::ColdChain => cold_chain()?,
            ScenarioId::Mining => mining()?,
            ScenarioId::Glacial => glacial()?,
            ScenarioId::Rainforest => rainforest()?,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), StoryError> {
        if self.loop_seconds == 0 {
            return Err(StoryError::ZeroLoopDuration);
        }
        if let Some(phase_start) = self.phases.start_of(Phase::Incident) {
            if self.incident.start < phase_start {
                return Err(StoryError::IncidentBeforePhase {
                    window_start: self.incident.start,
                    phase_start,
                });
            }
        }
        self.metrics.iter().try_for_each(MetricSpec::validate)
    }
}

// Shared by the three "uplink drops, then incident" scripts.
fn blind_then_incident() -> Result<PhaseSchedule, StoryError> {
    PhaseSchedule::new(vec![(12, Phase::Normal), (15, Phase::Blind)], Phase::Incident)
}

const INCIDENT_SETTLE: ProgressWindow = ProgressWindow::new(15, 35);

// ---------------- cold chain (truck, Andean corridor) ----------------

const COLD_CHAIN_ROUTE: &str =
    "M 750 100 C 680 180 580 250 460 280 C 380 310 280 350 220 390 C 180 420 150 460 130 490";

const COLD_CHAIN_SCRIPT: &[ScriptedEntry] = &[
    ScriptedEntry::new(12, "AVISO: Pérdida de enlace 4G. Cambiando a soberano.", LogKind::Warning),
    ScriptedEntry::new(13, "HARDWARE: Modo Soberano activado. Grabación local.", LogKind::Action),
    ScriptedEntry::new(15, "ALERTA: Desviación térmica detectada (+2σ)", LogKind::Error),
    ScriptedEntry::new(16, "DIAGNÓSTICO: Ejecutando análisis de sensores...", LogKind::Info),
    ScriptedEntry::new(19, "FALLA CONFIRMADA: Compresor Secundario", LogKind::Error),
    ScriptedEntry::new(22, "ACCIÓN: SMS local enviado a conductor (Unidad #404)", LogKind::Action),
    ScriptedEntry::new(32, "PROTOCOL QORI: Iniciando compensación térmica", LogKind::Info),
    ScriptedEntry::new(38, "RESULTADO: Sistema estabilizado. Alerta activa.", LogKind::Success),
];

fn cold_chain() -> Result<Scenario, StoryError> {
    Ok(Scenario {
        id: ScenarioId::ColdChain,
        title: "RANSA",
        subtitle: "SISTEMA DE MONITOREO OFFLINE",
        loop_seconds: DEFAULT_LOOP_SECONDS,
        phases: blind_then_incident()?,
        offline: Window::starting_at(12),
        alert: Window::starting_at(15),
        incident: INCIDENT_SETTLE,
        route: COLD_CHAIN_ROUTE,
        view_size: Vec2::new(900.0, 580.0),
        silent_zone: Zone { start: 0.42, end: 0.72 },
        lookahead: Lookahead::Distance(1.0),
        end_margin: ROUTE_END_MARGIN_PX,
        journey_easing: Easing::Linear,
        metrics: vec![
            MetricSpec {
                key: "cargo_temp",
                label: "Temperatura de carga",
                unit: "°C",
                decimals: 1,
                min: 1.8,
                max: 5.0,
                seed_offset: 0.0,
                alert_seed_offset: ALERT_SEED_OFFSET,
                rules: vec![
                    Rule::new(
                        Condition::Alert,
                        Target::Settle {
                            spike: 4.8,
                            settle: 3.5,
                            window: INCIDENT_SETTLE,
                        },
                        0.1,
                    ),
                    Rule::new(Condition::Phase(Phase::Blind), Target::Constant(2.2), 0.1),
                    Rule::new(Condition::Always, Target::Constant(2.0), 0.1),
                ],
            },
            MetricSpec {
                key: "speed",
                label: "Velocidad",
                unit: "km/h",
                decimals: 0,
                min: 0.0,
                max: 120.0,
                seed_offset: SECONDARY_SEED_OFFSET,
                alert_seed_offset: 0.0,
                rules: vec![
                    Rule::new(Condition::Alert, Target::Constant(25.0), 2.0),
                    Rule::new(Condition::InZone, Target::Constant(45.0), 2.0),
                    Rule::new(Condition::Always, Target::Constant(65.0), 2.0),
                ],
            },
        ],
        script: COLD_CHAIN_SCRIPT,
    })
}

// ---------------- open-pit mining (haul truck, switchback road) ----------------

const MINING_ROUTE: &str = "M 750 100 C 600 120 400 150 300 200 C 250 225 250 275 300 300 \
     C 400 350 600 380 650 400 C 700 420 700 460 600 480 C 400 520 200 540 130 550";

const MINING_SCRIPT: &[ScriptedEntry] = &[
    ScriptedEntry::new(12, "AVISO: Señal LTE débil (-110dBm). Zona de sombra.", LogKind::Warning),
    ScriptedEntry::new(15, "CONEXIÓN PERDIDA. Iniciando Modo Soberano (Edge AI).", LogKind::Error),
    ScriptedEntry::new(18, "ALERTA: Freno Trasero Izq - Aumento Térmico (+15%).", LogKind::Error),
    ScriptedEntry::new(19, "EDGE AI: Analizando vibración de rodamientos...", LogKind::Info),
    ScriptedEntry::new(22, "CRÍTICO: Temp > 580°C. Falla en Retardador.", LogKind::Error),
    ScriptedEntry::new(25, "ACCIÓN: Derating Automático de Motor (Prot. Activa).", LogKind::Action),
    ScriptedEntry::new(28, "NOTIFICACIÓN: Operador alertado via pantalla local.", LogKind::Info),
    ScriptedEntry::new(
        45,
        "ENLACE RESTAURADO: Subiendo paquete de incidente (4MB).",
        LogKind::Success,
    ),
];

fn mining() -> Result<Scenario, StoryError> {
    let spike = ProgressWindow::new(18, 10);
    Ok(Scenario {
        id: ScenarioId::Mining,
        title: "QORI MINE",
        subtitle: "Monitor de Rajo Abierto v2.4",
        loop_seconds: DEFAULT_LOOP_SECONDS,
        phases: PhaseSchedule::new(
            vec![(15, Phase::Normal), (45, Phase::Incident)],
            Phase::Recovery,
        )?,
        offline: Window::between(15, 45),
        alert: Window::between(18, 40),
        incident: spike,
        route: MINING_ROUTE,
        view_size: Vec2::new(900.0, 600.0),
        silent_zone: Zone { start: 0.40, end: 0.75 },
        lookahead: Lookahead::Distance(5.0),
        end_margin: ROUTE_END_MARGIN_PX,
        journey_easing: Easing::Linear,
        metrics: vec![
            MetricSpec {
                key: "brake_temp",
                label: "Temp. Freno",
                unit: "°C",
                decimals: 0,
                min: 0.0,
                max: 700.0,
                seed_offset: 0.0,
                alert_seed_offset: 0.0,
                rules: vec![
                    Rule::new(
                        Condition::Between(Window::between(0, 18)),
                        Target::Constant(320.0),
                        10.0,
                    ),
                    Rule::new(
                        Condition::Between(Window::between(18, 40)),
                        Target::Ramp {
                            from: 320.0,
                            to: 600.0,
                            window: spike,
                        },
                        15.0,
                    ),
                    // cooling down after the retarder recovers
                    Rule::new(
                        Condition::Always,
                        Target::Linear {
                            value: 450.0,
                            at: 40,
                            slope: -10.0,
                        },
                        0.0,
                    ),
                ],
            },
            MetricSpec {
                key: "payload",
                label: "Carga útil",
                unit: "t",
                decimals: 1,
                min: 370.0,
                max: 400.0,
                seed_offset: 0.0,
                alert_seed_offset: 0.0,
                rules: vec![Rule::new(Condition::Always, Target::Constant(384.5), 2.5)],
            },
        ],
        script: MINING_SCRIPT,
    })
}

// ---------------- glacial lake (buoy drifting on the perimeter) ----------------

const GLACIAL_ROUTE: &str = "M 450 150 Q 620 140 700 250 C 750 320 680 420 500 450 \
     C 320 480 200 400 180 280 C 170 200 280 160 450 150";

const GLACIAL_SCRIPT: &[ScriptedEntry] = &[
    ScriptedEntry::new(
        12,
        "AVISO: Enlace Satelital Interrumpido (Tormenta de Nieve).",
        LogKind::Warning,
    ),
    ScriptedEntry::new(
        13,
        "SISTEMA: Modo Guardián Activado. Procesamiento Local.",
        LogKind::Action,
    ),
    ScriptedEntry::new(15, "ALERTA: Onda de choque detectada (Posible Avalancha).", LogKind::Error),
    ScriptedEntry::new(16, "ANÁLISIS: Aumento súbito de nivel (+1.5m).", LogKind::Error),
    ScriptedEntry::new(18, "DIAGNÓSTICO: Presión Hidrostática Crítica > 120kPa", LogKind::Info),
    ScriptedEntry::new(
        20,
        "ACCIÓN: Sirenas de evacuación activadas en Valle (Huaraz).",
        LogKind::Action,
    ),
    ScriptedEntry::new(
        38,
        "ESTADO: Nivel de agua estabilizándose. Alerta vigente.",
        LogKind::Success,
    ),
];

fn glacial() -> Result<Scenario, StoryError> {
    Ok(Scenario {
        id: ScenarioId::Glacial,
        title: "ANA SAT",
        subtitle: "MONITOR GLOF · LAGUNA PALCACOCHA",
        loop_seconds: DEFAULT_LOOP_SECONDS,
        phases: blind_then_incident()?,
        offline: Window::starting_at(12),
        alert: Window::starting_at(15),
        incident: INCIDENT_SETTLE,
        route: GLACIAL_ROUTE,
        view_size: Vec2::new(900.0, 520.0),
        silent_zone: Zone { start: 0.3, end: 1.0 },
        lookahead: Lookahead::Fraction(0.002),
        end_margin: 0.0,
        journey_easing: Easing::EaseInOut,
        metrics: vec![
            MetricSpec {
                key: "pressure",
                label: "Presión hidrostática",
                unit: "kPa",
                decimals: 1,
                min: 98.0,
                max: 140.0,
                seed_offset: 0.0,
                alert_seed_offset: ALERT_SEED_OFFSET,
                rules: vec![
                    Rule::new(
                        Condition::Alert,
                        Target::Settle {
                            spike: 125.5,
                            settle: 115.0,
                            window: INCIDENT_SETTLE,
                        },
                        0.5,
                    ),
                    Rule::new(Condition::Phase(Phase::Blind), Target::Constant(102.0), 0.5),
                    Rule::new(Condition::Always, Target::Constant(101.3), 0.5),
                ],
            },
            MetricSpec {
                key: "water_level",
                label: "Nivel de agua",
                unit: "m",
                decimals: 2,
                min: 10.0,
                max: 20.0,
                seed_offset: SECONDARY_SEED_OFFSET,
                alert_seed_offset: 0.0,
                rules: vec![
                    Rule::new(Condition::Alert, Target::Constant(14.2), 0.1),
                    Rule::new(Condition::Always, Target::Constant(12.5), 0.1),
                ],
            },
        ],
        script: GLACIAL_SCRIPT,
    })
}

// ---------------- rainforest guardian (river patrol) ----------------

const RAINFOREST_ROUTE: &str =
    "M 720 110 C 650 170 560 230 460 280 C 380 320 300 350 240 380 C 200 400 170 430 150 460";

const RAINFOREST_SCRIPT: &[ScriptedEntry] = &[
    ScriptedEntry::new(12, "4G perdido. Activando 'Modo Guardián' (offline).", LogKind::Warning),
    ScriptedEntry::new(15, "Patrón acústico detectado (motosierra).", LogKind::Error),
    ScriptedEntry::new(19, "Firma espectral confirmada: Tala ilegal.", LogKind::Error),
    ScriptedEntry::new(22, "Alerta enviada a puesto de guardaparques (LoRaWAN).", LogKind::Action),
    ScriptedEntry::new(38, "Amenaza neutralizada. Patrulla en camino.", LogKind::Success),
];

fn rainforest() -> Result<Scenario, StoryError> {
    Ok(Scenario {
        id: ScenarioId::Rainforest,
        title: "BIO AMAYU",
        subtitle: "GUARDIAN NETWORK · AJE GROUP",
        loop_seconds: DEFAULT_LOOP_SECONDS,
        phases: blind_then_incident()?,
        offline: Window::starting_at(12),
        alert: Window::starting_at(15),
        incident: INCIDENT_SETTLE,
        route: RAINFOREST_ROUTE,
        view_size: Vec2::new(900.0, 520.0),
        silent_zone: Zone { start: 0.42, end: 0.72 },
        lookahead: Lookahead::Fraction(0.002),
        end_margin: 0.0,
        journey_easing: Easing::EaseInOut,
        metrics: vec![
            MetricSpec {
                key: "threat_level",
                label: "Nivel de amenaza",
                unit: "%",
                decimals: 1,
                min: 5.0,
                max: 100.0,
                seed_offset: 0.0,
                alert_seed_offset: ALERT_SEED_OFFSET,
                rules: vec![
                    Rule::new(
                        Condition::Alert,
                        Target::Settle {
                            spike: 82.0,
                            settle: 48.0,
                            window: INCIDENT_SETTLE,
                        },
                        3.0,
                    ),
                    Rule::new(Condition::Phase(Phase::Blind), Target::Constant(26.0), 3.0),
                    Rule::new(Condition::Always, Target::Constant(18.0), 3.0),
                ],
            },
            MetricSpec {
                key: "acoustic_db",
                label: "Nivel acústico",
                unit: "dB",
                decimals: 0,
                min: 0.0,
                max: 120.0,
                seed_offset: SECONDARY_SEED_OFFSET,
                alert_seed_offset: 0.0,
                rules: vec![
                    Rule::new(Condition::Alert, Target::Constant(78.0), 2.5),
                    Rule::new(Condition::InZone, Target::Constant(42.0), 2.5),
                    Rule::new(Condition::Always, Target::Constant(58.0), 2.5),
                ],
            },
        ],
        script: RAINFOREST_SCRIPT,
    })
}
