use crate::domain::{DomainResult, ValidationErrors};

/// A reported position must be a finite, non-negative number of seconds
pub fn validate_position(position: f64) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    if !position.is_finite() || position < 0.0 {
        errors.push("position", "Position must be a non-negative number of seconds");
    }
    errors.into_result()
}

/// Invariants that must hold true for the Watch History domain:
///
/// 1. At most one entry per content id
/// 2. The latest report always wins, whether it moves forward or backward
/// 3. Positions are never negative
/// 4. Entries outlive the catalog records they point to
