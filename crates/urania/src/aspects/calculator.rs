use crate::angles::{round_to, separation};
use crate::aspects::types::{AspectKind, AspectRecord, DEFAULT_ASPECTS, DEFAULT_ORB};
use crate::bodies::BodySet;

/// Find every aspect between every unordered pair of bodies.
///
/// Pairs are visited in body-set order (i < j), and within a pair the table
/// is walked in order. A pair may match more than one kind if the table has
/// overlapping bands; each match yields its own record.
pub fn find_aspects(
    bodies: &BodySet,
    aspect_table: &[(AspectKind, f64)],
    orb: f64,
) -> Vec<AspectRecord> {
    let entries: Vec<_> = bodies.iter().collect();
    let mut aspects = Vec::new();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (b1, &lon1) = entries[i];
            let (b2, &lon2) = entries[j];
            let angle = separation(lon1, lon2);

            for &(kind, exact) in aspect_table {
                if (angle - exact).abs() <= orb {
                    aspects.push(AspectRecord {
                        between: [b1, b2],
                        aspect: kind,
                        angle: round_to(angle, 2),
                    });
                }
            }
        }
    }

    aspects
}

/// Aspect calculator bound to one aspect table and orb.
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    table: Vec<(AspectKind, f64)>,
    orb: f64,
}

impl AspectCalculator {
    /// Create a calculator with a custom table and orb
    pub fn new(table: Vec<(AspectKind, f64)>, orb: f64) -> Self {
        Self { table, orb }
    }

    /// Default table with a custom orb
    pub fn with_orb(orb: f64) -> Self {
        Self::new(DEFAULT_ASPECTS.to_vec(), orb)
    }

    pub fn orb(&self) -> f64 {
        self.orb
    }

    pub fn compute(&self, bodies: &BodySet) -> Vec<AspectRecord> {
        find_aspects(bodies, &self.table, self.orb)
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::with_orb(DEFAULT_ORB)
    }
}
