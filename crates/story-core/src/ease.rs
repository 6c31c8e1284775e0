//! Display-layer easing. The engine emits one discrete value per tick; these
//! tweens only decide what is drawn between ticks.

/// Timing curve for a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

// Solve x(s) = t for the curve parameter s, then return y(s).
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let bez = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let bez_dx = |s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * x1 + 6.0 * inv * s * (x2 - x1) + 3.0 * s * s * (1.0 - x2)
    };

    let mut s = t;
    for _ in 0..8 {
        let err = bez(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return bez(y1, y2, s);
        }
        let d = bez_dx(s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    // Newton stalled; fall back to bisection.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..40 {
        let x = bez(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bez(y1, y2, s)
}

/// Fixed-duration transition between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_sec: f64,
    pub duration_sec: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn value_at(&self, now_sec: f64) -> f64 {
        if self.duration_sec <= 0.0 {
            return self.to;
        }
        let t = (now_sec - self.start_sec) / self.duration_sec;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    #[inline]
    pub fn is_done(&self, now_sec: f64) -> bool {
        now_sec >= self.start_sec + self.duration_sec
    }
}

/// A displayed value that glides toward whatever target it was last given.
///
/// Retargeting mid-flight starts the new tween from the value currently on
/// screen, so the curve never jumps.
#[derive(Clone, Copy, Debug)]
pub struct Smoothed {
    tween: Tween,
}

impl Smoothed {
    pub fn new(initial: f64, duration_sec: f64, easing: Easing) -> Self {
        Self {
            tween: Tween {
                from: initial,
                to: initial,
                start_sec: 0.0,
                duration_sec,
                easing,
            },
        }
    }

    pub fn retarget(&mut self, target: f64, now_sec: f64) {
        let current = self.tween.value_at(now_sec);
        self.tween = Tween {
            from: current,
            to: target,
            start_sec: now_sec,
            ..self.tween
        };
    }

    /// Snap to `value` without animating (used on mount and loop wrap).
    pub fn jump(&mut self, value: f64) {
        self.tween.from = value;
        self.tween.to = value;
    }

    #[inline]
    pub fn value(&self, now_sec: f64) -> f64 {
        self.tween.value_at(now_sec)
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.tween.to
    }

    #[inline]
    pub fn is_settled(&self, now_sec: f64) -> bool {
        self.tween.is_done(now_sec)
    }
}
