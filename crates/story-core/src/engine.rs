use crate::clock::{day_cycle, journey_progress, StoryClock, Tick};
use crate::error::{LogError, StoryError};
use crate::event_log::{LogBook, LogLine};
use crate::metric::{MetricReading, SampleContext};
use crate::path::{Route, RoutePosition, RouteSampler};
use crate::phase::Phase;
use crate::scenario::{Scenario, ScenarioId};

/// Everything a dashboard needs to draw one story second.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    pub seconds: u32,
    pub phase: Phase,
    pub offline: bool,
    pub alert: bool,
    pub journey_progress: f64,
    pub incident_progress: f64,
    pub day_cycle: f64,
    pub metrics: Vec<MetricReading>,
    pub position: RoutePosition,
    pub logs: Vec<LogLine<'a>>,
}

impl Frame<'_> {
    pub fn metric(&self, key: &str) -> Option<&MetricReading> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

/// One running demo: a scenario, its clock and the operator log.
///
/// Apart from the user log, everything in a [`Frame`] is a pure function of
/// the clock's current second.
pub struct StoryEngine {
    scenario: Scenario,
    clock: StoryClock,
    sampler: RouteSampler,
    log: LogBook,
}

impl StoryEngine {
    pub fn new(scenario: Scenario) -> Result<Self, StoryError> {
        scenario.validate()?;
        let clock = StoryClock::new(scenario.loop_seconds)?;
        let route = Route::parse(scenario.route)?;
        let sampler = RouteSampler::new(route, scenario.lookahead, scenario.end_margin);
        log::debug!(
            "[story] {} ready: loop={}s route={:.1}px metrics={}",
            scenario.id,
            scenario.loop_seconds,
            sampler.route().total_length(),
            scenario.metrics.len()
        );
        Ok(Self {
            scenario,
            clock,
            sampler,
            log: LogBook::new(),
        })
    }

    pub fn builtin(id: ScenarioId) -> Result<Self, StoryError> {
        Self::new(Scenario::builtin(id)?)
    }

    #[inline]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[inline]
    pub fn seconds(&self) -> u32 {
        self.clock.seconds()
    }

    #[inline]
    pub fn log(&self) -> &LogBook {
        &self.log
    }

    #[inline]
    pub fn sampler(&self) -> &RouteSampler {
        &self.sampler
    }

    /// Advance one second. A wrap back to 0 starts a fresh loop and drops the
    /// operator messages of the previous one.
    pub fn tick(&mut self) -> Tick {
        let tick = self.clock.tick();
        if tick.wrapped {
            self.log.clear();
            log::debug!("[story] {} loop restarted", self.scenario.id);
        }
        tick
    }

    pub fn reset(&mut self) -> Tick {
        self.log.clear();
        self.clock.reset()
    }

    pub fn submit(&mut self, text: &str) -> Result<u64, LogError> {
        self.log.submit(text, self.clock.seconds())
    }

    pub fn phase_at(&self, seconds: u32) -> Phase {
        self.scenario.phases.phase_at(seconds)
    }

    /// Signals and metric values for `seconds`, without touching the log.
    pub fn context_at(&self, seconds: u32) -> SampleContext {
        let progress = journey_progress(seconds, self.scenario.loop_seconds);
        SampleContext {
            seconds,
            phase: self.phase_at(seconds),
            offline: self.scenario.offline.contains(seconds),
            alert: self.scenario.alert.contains(seconds),
            in_zone: self.scenario.silent_zone.contains(progress),
        }
    }

    pub fn metrics_at(&self, seconds: u32) -> Vec<MetricReading> {
        let ctx = self.context_at(seconds);
        self.scenario
            .metrics
            .iter()
            .map(|spec| MetricReading {
                key: spec.key,
                label: spec.label,
                unit: spec.unit,
                decimals: spec.decimals,
                value: spec.sample(&ctx),
            })
            .collect()
    }

    pub fn frame(&self) -> Frame<'_> {
        self.frame_at(self.clock.seconds())
    }

    pub fn frame_at(&self, seconds: u32) -> Frame<'_> {
        let ctx = self.context_at(seconds);
        let progress = journey_progress(seconds, self.scenario.loop_seconds);
        Frame {
            seconds,
            phase: ctx.phase,
            offline: ctx.offline,
            alert: ctx.alert,
            journey_progress: progress,
            incident_progress: self.scenario.incident.progress(seconds),
            day_cycle: day_cycle(seconds, self.scenario.loop_seconds),
            metrics: self.metrics_at(seconds),
            position: self.sampler.sample(progress),
            logs: self.log.merged(self.scenario.script, seconds),
        }
    }
}
