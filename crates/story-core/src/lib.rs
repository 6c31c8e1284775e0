pub mod clock;
pub mod constants;
pub mod corridor;
pub mod ease;
pub mod engine;
pub mod error;
pub mod event_log;
pub mod metric;
pub mod noise;
pub mod path;
pub mod phase;
pub mod scenario;

pub use clock::*;
pub use constants::*;
pub use corridor::*;
pub use ease::*;
pub use engine::*;
pub use error::*;
pub use event_log::*;
pub use metric::*;
pub use noise::*;
pub use path::*;
pub use phase::*;
pub use scenario::*;
