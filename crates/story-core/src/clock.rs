//! Wrapping one-second story clock.
//!
//! The clock itself does not own a timer: the frontend calls [`StoryClock::tick`]
//! from whatever recurring source it has (a browser interval, a test loop) and
//! is responsible for cancelling that source on teardown.

use crate::error::StoryError;

/// Result of advancing the clock by one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub seconds: u32,
    /// True when this tick brought the counter back to 0.
    pub wrapped: bool,
}

#[derive(Clone, Debug)]
pub struct StoryClock {
    seconds: u32,
    loop_duration: u32,
}

impl StoryClock {
    pub fn new(loop_duration: u32) -> Result<Self, StoryError> {
        if loop_duration == 0 {
            return Err(StoryError::ZeroLoopDuration);
        }
        Ok(Self {
            seconds: 0,
            loop_duration,
        })
    }

    #[inline]
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    #[inline]
    pub fn loop_duration(&self) -> u32 {
        self.loop_duration
    }

    pub fn tick(&mut self) -> Tick {
        self.seconds = (self.seconds + 1) % self.loop_duration;
        Tick {
            seconds: self.seconds,
            wrapped: self.seconds == 0,
        }
    }

    /// Jump back to the start of the loop. Reported as a wrap so dependents
    /// clear their per-loop state the same way.
    pub fn reset(&mut self) -> Tick {
        self.seconds = 0;
        Tick {
            seconds: 0,
            wrapped: true,
        }
    }

    #[inline]
    pub fn journey_progress(&self) -> f64 {
        journey_progress(self.seconds, self.loop_duration)
    }
}

/// Fraction of the loop elapsed, clamped so the marker never overshoots.
#[inline]
pub fn journey_progress(seconds: u32, loop_duration: u32) -> f64 {
    (seconds as f64 / loop_duration.max(1) as f64).min(1.0)
}

/// Slow sinusoid over one loop, 0 at both ends and 1 mid-story.
#[inline]
pub fn day_cycle(seconds: u32, loop_duration: u32) -> f64 {
    (seconds as f64 / loop_duration.max(1) as f64 * std::f64::consts::PI).sin()
}
