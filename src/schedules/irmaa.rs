//! Medicare Part B IRMAA surcharge brackets
//!
//! IRMAA is a cliff-edge surcharge: the filer pays the full monthly amount of
//! whichever bracket contains their MAGI, not a blended marginal figure.

use serde::{Deserialize, Serialize};

/// One IRMAA surcharge bracket
///
/// Same ordering invariant as tax brackets: ascending by `lower`, contiguous,
/// unbounded bracket last. Matching is by containment of a single bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrmaaBracket {
    /// Lower bound of the bracket (inclusive)
    pub lower: f64,

    /// Upper bound of the bracket; `None` means unbounded
    pub upper: Option<f64>,

    /// Monthly Part B surcharge for MAGI in this bracket
    pub monthly_surcharge: f64,
}

impl IrmaaBracket {
    pub fn new(lower: f64, upper: Option<f64>, monthly_surcharge: f64) -> Self {
        Self {
            lower,
            upper,
            monthly_surcharge,
        }
    }
}

/// Look up the IRMAA surcharge for a MAGI.
///
/// Returns `(monthly_surcharge, annual_surcharge)` from the single bracket
/// containing `magi`. Bounds are inclusive on both ends; brackets are scanned
/// highest-first so a MAGI sitting exactly on a shared boundary lands in the
/// bracket it opens, not the one it closes. If no bracket contains `magi`
/// (malformed schedule), returns `(0.0, 0.0)` rather than failing.
pub fn surcharge_for_magi(magi: f64, brackets: &[IrmaaBracket]) -> (f64, f64) {
    for bracket in brackets.iter().rev() {
        let upper = bracket.upper.unwrap_or(f64::INFINITY);
        if magi >= bracket.lower && magi <= upper {
            return (bracket.monthly_surcharge, bracket.monthly_surcharge * 12.0);
        }
    }
    (0.0, 0.0)
}

/// Default single-filer IRMAA schedule for a recent plan year
pub fn default_irmaa_brackets() -> Vec<IrmaaBracket> {
    vec![
        IrmaaBracket::new(0.0, Some(106_011.0), 0.0),
        IrmaaBracket::new(106_011.0, Some(133_001.0), 87.70),
        IrmaaBracket::new(133_001.0, Some(167_000.0), 220.30),
        IrmaaBracket::new(167_000.0, Some(200_001.0), 352.90),
        IrmaaBracket::new(200_001.0, Some(500_000.0), 485.50),
        IrmaaBracket::new(500_000.0, None, 529.70),
    ]
}
