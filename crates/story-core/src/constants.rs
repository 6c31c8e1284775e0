// Shared timing and tuning constants used by the engine and the web frontend.

// Story loop
pub const DEFAULT_LOOP_SECONDS: u32 = 60; // one full narrative, then wrap to 0
pub const TICK_INTERVAL_MS: i32 = 1000; // story clock cadence

// Hash noise (sin-fract). Only used to decorrelate successive seeds.
pub const NOISE_SEED_SCALE: f64 = 12.9898;
pub const NOISE_GAIN: f64 = 43758.5453;

// Seed offsets that keep independent metrics sharing one tick apart
pub const ALERT_SEED_OFFSET: f64 = 50.0;
pub const SECONDARY_SEED_OFFSET: f64 = 200.0;

// Display smoothing
pub const METRIC_TWEEN_SEC: f64 = 0.8; // per-tick metric easing
pub const JOURNEY_TWEEN_SEC: f64 = 0.9; // route marker easing

// Route geometry
pub const CURVE_FLATTEN_STEPS: usize = 48; // line segments per bezier
pub const ROUTE_END_MARGIN_PX: f32 = 0.1; // keeps the marker just short of the path end

// Corridor console
pub const CORRIDOR_STEP_MS: i32 = 2000;
pub const CORRIDOR_LOG_LINES: usize = 6;
pub const CORRIDOR_LEDGER_DELAY_MS: i32 = 1200; // ms, overlay before the community view
pub const CORRIDOR_PACKET_START: u64 = 21_340;
pub const CORRIDOR_REMAINING_KM: f64 = 320.0;
pub const CORRIDOR_TOWN_SPEED_LIMIT: f64 = 30.0;
