//! Modifier - an immutable magnitude paired with an operation kind

use crate::error::AttributeError;
use crate::operation::OperationKind;
use serde::{Deserialize, Serialize};

/// Tolerance for magnitude comparisons throughout the crate
pub(crate) const MAGNITUDE_EPSILON: f64 = f64::EPSILON;

/// A single modification applied to an attribute during evaluation
///
/// Modifiers are pure values with no identity: two modifiers with the same
/// operation whose magnitudes are within epsilon compare equal. Once built a
/// modifier never changes; it is freely copyable and shareable.
///
/// Epsilon-based equality is not a hashable equivalence relation, so
/// `Modifier` deliberately implements neither `Eq` nor `Hash`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Modifier {
    magnitude: f64,
    operation: OperationKind,
}

impl Modifier {
    /// Create a modifier from a magnitude and operation kind
    pub fn new(magnitude: f64, operation: OperationKind) -> Self {
        Modifier { magnitude, operation }
    }

    /// Create a modifier from a magnitude and a canonical operation name
    ///
    /// The name is matched case-insensitively against the 14 canonical
    /// operation names. Fails with [`AttributeError::InvalidOperationName`]
    /// for anything else.
    pub fn parse(magnitude: f64, operation: &str) -> Result<Self, AttributeError> {
        Ok(Modifier {
            magnitude,
            operation: operation.parse()?,
        })
    }

    /// The magnitude this modifier contributes
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The operation this modifier applies
    pub fn operation(&self) -> OperationKind {
        self.operation
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        (self.magnitude - other.magnitude).abs() < MAGNITUDE_EPSILON
            && self.operation == other.operation
    }
}
