use crate::bodies::Body;
use serde::{Deserialize, Serialize};

/// Canonical aspect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
}

impl AspectKind {
    /// Exact separation angle in degrees
    pub fn degrees(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
        }
    }
}

/// Aspect table in evaluation order.
pub const DEFAULT_ASPECTS: &[(AspectKind, f64)] = &[
    (AspectKind::Conjunction, 0.0),
    (AspectKind::Opposition, 180.0),
    (AspectKind::Trine, 120.0),
    (AspectKind::Square, 90.0),
];

/// Maximum deviation from an exact angle still counted as the aspect.
pub const DEFAULT_ORB: f64 = 6.0;

/// One detected aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRecord {
    pub between: [Body; 2],
    pub aspect: AspectKind,
    /// Actual separation in degrees, rounded to 2 decimals
    pub angle: f64,
}
