// Eased on-screen values for one dashboard. The engine produces one frame
// per story second; these tweens fill the animation frames in between.

use story_core::{Easing, Frame, Smoothed, JOURNEY_TWEEN_SEC, METRIC_TWEEN_SEC};

pub struct DisplayState {
    metrics: Vec<Smoothed>,
    journey: Smoothed,
}

impl DisplayState {
    pub fn new(frame: &Frame<'_>, journey_easing: Easing) -> Self {
        Self {
            metrics: frame
                .metrics
                .iter()
                .map(|m| Smoothed::new(m.value, METRIC_TWEEN_SEC, Easing::EaseOut))
                .collect(),
            journey: Smoothed::new(frame.journey_progress, JOURNEY_TWEEN_SEC, journey_easing),
        }
    }

    /// Point every tween at the values of a new story second. After a wrap
    /// the marker snaps back to the start instead of gliding backwards.
    pub fn retarget(&mut self, frame: &Frame<'_>, wrapped: bool, now_sec: f64) {
        for (smoothed, reading) in self.metrics.iter_mut().zip(&frame.metrics) {
            smoothed.retarget(reading.value, now_sec);
        }
        if wrapped {
            self.journey.jump(frame.journey_progress);
        } else {
            self.journey.retarget(frame.journey_progress, now_sec);
        }
    }

    /// Snap everything to `frame`, e.g. after a manual reset.
    pub fn jump(&mut self, frame: &Frame<'_>) {
        for (smoothed, reading) in self.metrics.iter_mut().zip(&frame.metrics) {
            smoothed.jump(reading.value);
        }
        self.journey.jump(frame.journey_progress);
    }

    #[inline]
    pub fn metric(&self, index: usize, now_sec: f64) -> Option<f64> {
        self.metrics.get(index).map(|m| m.value(now_sec))
    }

    #[inline]
    pub fn journey(&self, now_sec: f64) -> f64 {
        self.journey.value(now_sec)
    }

    pub fn is_settled(&self, now_sec: f64) -> bool {
        self.journey.is_settled(now_sec) && self.metrics.iter().all(|m| m.is_settled(now_sec))
    }
}
