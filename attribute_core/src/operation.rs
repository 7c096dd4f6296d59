//! Modifier operation kinds and their fixed pipeline ordering
//!
//! Every modifier carries one `OperationKind`. The kinds form two mirrored
//! phases (`Base`, then `Total`); within a phase the pipeline always applies
//! early additions, then the additive multiplier, then the multiplicative
//! multiplier, then late additions, then floor/ceiling clamps, then override.
//! The set is closed - there is no way to register custom operations.

use crate::error::AttributeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Lookup table from lowercased canonical name to operation kind
static NAME_LOOKUP: OnceLock<HashMap<String, OperationKind>> = OnceLock::new();

fn name_lookup() -> &'static HashMap<String, OperationKind> {
    NAME_LOOKUP.get_or_init(|| {
        OperationKind::all()
            .iter()
            .map(|op| (op.name().to_ascii_lowercase(), *op))
            .collect()
    })
}

/// Which half of the evaluation pipeline an operation belongs to
///
/// The `Base` phase runs against the attribute's effective base value; its
/// output seeds the `Total` phase, whose output is the attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Base,
    Total,
}

/// The operation a modifier applies during attribute evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Added to the running value before any multipliers (Base phase)
    AddBaseEarly,
    /// Summed into a shared `1 + sum` multiplier (Base phase)
    MultiplyBaseAdditive,
    /// Multiplied into a shared product multiplier (Base phase)
    MultiplyBaseMultiplicative,
    /// Added to the running value after all multipliers (Base phase)
    AddBaseLate,
    /// Floor on the running value; the largest floor wins (Base phase)
    MinBase,
    /// Ceiling on the running value; the smallest ceiling wins (Base phase)
    MaxBase,
    /// Overrides the running value; the last one added wins (Base phase)
    SetBase,
    /// Added to the running value before any multipliers (Total phase)
    AddTotalEarly,
    /// Summed into a shared `1 + sum` multiplier (Total phase)
    MultiplyTotalAdditive,
    /// Multiplied into a shared product multiplier (Total phase)
    MultiplyTotalMultiplicative,
    /// Added to the running value after all multipliers (Total phase)
    AddTotalLate,
    /// Floor on the running value; the largest floor wins (Total phase)
    MinTotal,
    /// Ceiling on the running value; the smallest ceiling wins (Total phase)
    MaxTotal,
    /// Overrides the running value; the last one added wins (Total phase)
    SetTotal,
}

impl OperationKind {
    /// Get all operation kinds, in pipeline order
    pub fn all() -> &'static [OperationKind] {
        &[
            OperationKind::AddBaseEarly,
            OperationKind::MultiplyBaseAdditive,
            OperationKind::MultiplyBaseMultiplicative,
            OperationKind::AddBaseLate,
            OperationKind::MinBase,
            OperationKind::MaxBase,
            OperationKind::SetBase,
            OperationKind::AddTotalEarly,
            OperationKind::MultiplyTotalAdditive,
            OperationKind::MultiplyTotalMultiplicative,
            OperationKind::AddTotalLate,
            OperationKind::MinTotal,
            OperationKind::MaxTotal,
            OperationKind::SetTotal,
        ]
    }

    /// Get all canonical operation names, in pipeline order
    pub fn names() -> [&'static str; 14] {
        [
            "AddBaseEarly",
            "MultiplyBaseAdditive",
            "MultiplyBaseMultiplicative",
            "AddBaseLate",
            "MinBase",
            "MaxBase",
            "SetBase",
            "AddTotalEarly",
            "MultiplyTotalAdditive",
            "MultiplyTotalMultiplicative",
            "AddTotalLate",
            "MinTotal",
            "MaxTotal",
            "SetTotal",
        ]
    }

    /// The canonical name of this operation
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::AddBaseEarly => "AddBaseEarly",
            OperationKind::MultiplyBaseAdditive => "MultiplyBaseAdditive",
            OperationKind::MultiplyBaseMultiplicative => "MultiplyBaseMultiplicative",
            OperationKind::AddBaseLate => "AddBaseLate",
            OperationKind::MinBase => "MinBase",
            OperationKind::MaxBase => "MaxBase",
            OperationKind::SetBase => "SetBase",
            OperationKind::AddTotalEarly => "AddTotalEarly",
            OperationKind::MultiplyTotalAdditive => "MultiplyTotalAdditive",
            OperationKind::MultiplyTotalMultiplicative => "MultiplyTotalMultiplicative",
            OperationKind::AddTotalLate => "AddTotalLate",
            OperationKind::MinTotal => "MinTotal",
            OperationKind::MaxTotal => "MaxTotal",
            OperationKind::SetTotal => "SetTotal",
        }
    }

    /// Which pipeline phase this operation runs in
    pub fn phase(&self) -> Phase {
        match self {
            OperationKind::AddBaseEarly
            | OperationKind::MultiplyBaseAdditive
            | OperationKind::MultiplyBaseMultiplicative
            | OperationKind::AddBaseLate
            | OperationKind::MinBase
            | OperationKind::MaxBase
            | OperationKind::SetBase => Phase::Base,
            OperationKind::AddTotalEarly
            | OperationKind::MultiplyTotalAdditive
            | OperationKind::MultiplyTotalMultiplicative
            | OperationKind::AddTotalLate
            | OperationKind::MinTotal
            | OperationKind::MaxTotal
            | OperationKind::SetTotal => Phase::Total,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OperationKind {
    type Err = AttributeError;

    /// Parse a canonical operation name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        name_lookup()
            .get(&s.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| AttributeError::InvalidOperationName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_parse_back() {
        for op in OperationKind::all() {
            let parsed: OperationKind = op.name().parse().unwrap();
            assert_eq!(parsed, *op);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "addbaseearly".parse::<OperationKind>().unwrap(),
            OperationKind::AddBaseEarly
        );
        assert_eq!(
            "MULTIPLYTOTALMULTIPLICATIVE".parse::<OperationKind>().unwrap(),
            OperationKind::MultiplyTotalMultiplicative
        );
        assert_eq!(
            "setTotal".parse::<OperationKind>().unwrap(),
            OperationKind::SetTotal
        );
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = "AddBaseSometimes".parse::<OperationKind>().unwrap_err();
        assert_eq!(
            err,
            AttributeError::InvalidOperationName("AddBaseSometimes".to_string())
        );
        // The error message should list every valid name for diagnostics
        let message = err.to_string();
        for name in OperationKind::names() {
            assert!(message.contains(name), "missing '{}' in: {}", name, message);
        }
    }

    #[test]
    fn test_phase_split() {
        let base_count = OperationKind::all()
            .iter()
            .filter(|op| op.phase() == Phase::Base)
            .count();
        assert_eq!(base_count, 7);
        assert_eq!(OperationKind::SetBase.phase(), Phase::Base);
        assert_eq!(OperationKind::AddTotalEarly.phase(), Phase::Total);
    }

    #[test]
    fn test_display_matches_canonical_name() {
        assert_eq!(
            OperationKind::MultiplyBaseAdditive.to_string(),
            "MultiplyBaseAdditive"
        );
    }
}
