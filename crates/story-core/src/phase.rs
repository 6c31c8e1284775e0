use crate::error::StoryError;

/// Narrative stage of a demo script. Ordered: a loop only moves forward
/// through these until the clock wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Normal,
    Blind,
    Incident,
    Recovery,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Normal => "NORMAL",
            Phase::Blind => "BLIND",
            Phase::Incident => "INCIDENT",
            Phase::Recovery => "RECOVERY",
        }
    }
}

/// Ordered threshold table mapping story seconds to a [`Phase`].
///
/// Each `(threshold, phase)` pair applies while `seconds < threshold`; the
/// first match wins and `last` covers everything after the final threshold.
#[derive(Clone, Debug)]
pub struct PhaseSchedule {
    thresholds: Vec<(u32, Phase)>,
    last: Phase,
}

impl PhaseSchedule {
    pub fn new(thresholds: Vec<(u32, Phase)>, last: Phase) -> Result<Self, StoryError> {
        for pair in thresholds.windows(2) {
            let (prev_t, prev_p) = pair[0];
            let (next_t, next_p) = pair[1];
            if next_t <= prev_t {
                return Err(StoryError::UnorderedThresholds {
                    previous: prev_t,
                    next: next_t,
                });
            }
            if next_p < prev_p {
                return Err(StoryError::RegressingPhase {
                    previous: prev_p,
                    next: next_p,
                });
            }
        }
        if let Some(&(_, final_p)) = thresholds.last() {
            if last < final_p {
                return Err(StoryError::RegressingPhase {
                    previous: final_p,
                    next: last,
                });
            }
        }
        Ok(Self { thresholds, last })
    }

    pub fn phase_at(&self, seconds: u32) -> Phase {
        self.thresholds
            .iter()
            .find(|(threshold, _)| seconds < *threshold)
            .map(|&(_, phase)| phase)
            .unwrap_or(self.last)
    }

    /// First second at which `phase` is active, if the schedule ever reaches it.
    pub fn start_of(&self, phase: Phase) -> Option<u32> {
        let mut start = 0;
        for &(threshold, p) in &self.thresholds {
            if p == phase {
                return Some(start);
            }
            start = threshold;
        }
        (self.last == phase).then_some(start)
    }
}

/// Half-open range of story seconds, `[start, end)`; `end = None` runs to the
/// end of the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: u32,
    pub end: Option<u32>,
}

impl Window {
    pub const fn starting_at(start: u32) -> Self {
        Self { start, end: None }
    }

    pub const fn between(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    #[inline]
    pub fn contains(&self, seconds: u32) -> bool {
        seconds >= self.start && self.end.map_or(true, |end| seconds < end)
    }
}
