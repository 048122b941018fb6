pub mod calculator;
pub mod types;

pub use calculator::{find_aspects, AspectCalculator};
pub use types::{AspectKind, AspectRecord, DEFAULT_ASPECTS, DEFAULT_ORB};
