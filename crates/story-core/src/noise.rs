use crate::constants::{NOISE_GAIN, NOISE_SEED_SCALE};

/// Deterministic hash noise in `[-amplitude/2, amplitude/2)`.
///
/// Not a statistical RNG: the same seed always yields the same value, which
/// keeps every playback of a demo identical.
#[inline]
pub fn noise(seed: f64, amplitude: f64) -> f64 {
    let x = (seed * NOISE_SEED_SCALE).sin() * NOISE_GAIN;
    let frac = x - x.floor();
    (frac - 0.5) * amplitude
}
