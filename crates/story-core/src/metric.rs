//! Synthetic sensor readings: a rule-selected target plus hash noise,
//! clamped to the metric's declared range.

use crate::error::StoryError;
use crate::noise::noise;
use crate::phase::{Phase, Window};

/// Linear progress through a span of story seconds, clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressWindow {
    pub start: u32,
    pub length: u32,
}

impl ProgressWindow {
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn progress(&self, seconds: u32) -> f64 {
        let elapsed = seconds as f64 - self.start as f64;
        (elapsed / self.length.max(1) as f64).clamp(0.0, 1.0)
    }
}

/// Shape of the value a metric is pulled toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    Constant(f64),
    /// Jumps to `spike`, then eases linearly down (or up) to `settle`.
    Settle {
        spike: f64,
        settle: f64,
        window: ProgressWindow,
    },
    /// Climbs linearly from `from` to `to` across the window.
    Ramp {
        from: f64,
        to: f64,
        window: ProgressWindow,
    },
    /// `value` at second `at`, changing by `slope` per second after that.
    Linear { value: f64, at: u32, slope: f64 },
}

impl Target {
    pub fn value_at(&self, seconds: u32) -> f64 {
        match *self {
            Target::Constant(v) => v,
            Target::Settle {
                spike,
                settle,
                window,
            } => spike - (spike - settle) * window.progress(seconds),
            Target::Ramp { from, to, window } => from + (to - from) * window.progress(seconds),
            Target::Linear { value, at, slope } => value + (seconds as f64 - at as f64) * slope,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    Always,
    Phase(Phase),
    Alert,
    Offline,
    /// Journey progress inside the scenario's silent zone.
    InZone,
    Between(Window),
}

/// Everything a rule may look at for one tick.
#[derive(Clone, Copy, Debug)]
pub struct SampleContext {
    pub seconds: u32,
    pub phase: Phase,
    pub offline: bool,
    pub alert: bool,
    pub in_zone: bool,
}

impl Condition {
    #[inline]
    pub fn matches(&self, ctx: &SampleContext) -> bool {
        match *self {
            Condition::Always => true,
            Condition::Phase(p) => ctx.phase == p,
            Condition::Alert => ctx.alert,
            Condition::Offline => ctx.offline,
            Condition::InZone => ctx.in_zone,
            Condition::Between(w) => w.contains(ctx.seconds),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub when: Condition,
    pub target: Target,
    pub noise: f64,
}

impl Rule {
    pub const fn new(when: Condition, target: Target, noise: f64) -> Self {
        Self {
            when,
            target,
            noise,
        }
    }
}

/// Static description of one synthetic metric.
///
/// Rules are tried in order and the first whose condition matches supplies the
/// target and noise amplitude; keep an `Always` rule last as the catch-all.
#[derive(Clone, Debug)]
pub struct MetricSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub decimals: usize,
    pub min: f64,
    pub max: f64,
    pub seed_offset: f64,
    /// Extra seed shift while the alert is active, so the incident curve
    /// does not replay the calm-phase jitter.
    pub alert_seed_offset: f64,
    pub rules: Vec<Rule>,
}

impl MetricSpec {
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.rules.is_empty() {
            return Err(StoryError::EmptyRules { key: self.key });
        }
        if self.min > self.max {
            return Err(StoryError::InvertedRange {
                key: self.key,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn seed(&self, ctx: &SampleContext) -> f64 {
        let alert_shift = if ctx.alert { self.alert_seed_offset } else { 0.0 };
        ctx.seconds as f64 + self.seed_offset + alert_shift
    }

    /// Computed value for this tick; always within `[min, max]`.
    pub fn sample(&self, ctx: &SampleContext) -> f64 {
        let raw = match self.rules.iter().find(|r| r.when.matches(ctx)) {
            Some(rule) => rule.target.value_at(ctx.seconds) + noise(self.seed(ctx), rule.noise),
            None => self.min,
        };
        raw.clamp(self.min, self.max)
    }
}

/// One metric's value for a frame, carrying its display metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricReading {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub decimals: usize,
    pub value: f64,
}
