//! Attribute - a base value plus modifiers, evaluated through a fixed pipeline
//!
//! Evaluation runs two mirrored phases. The Base phase starts from the
//! effective base value (construction base plus accumulated offset); the
//! Total phase starts from the Base phase's output. Each phase applies its
//! operation categories in a fixed order:
//!
//! 1. early additions (summed)
//! 2. additive multiplier (`1 + sum` of magnitudes, applied once)
//! 3. multiplicative multiplier (product of magnitudes, applied once)
//! 4. late additions (summed)
//! 5. floor (the largest floor magnitude wins)
//! 6. ceiling (the smallest ceiling magnitude wins)
//! 7. override (the last-added set magnitude wins)
//!
//! Insertion order of modifiers never affects the result, except for the
//! last-wins policy among `Set` modifiers of the same phase.

use crate::error::AttributeError;
use crate::modifier::{Modifier, MAGNITUDE_EPSILON};
use crate::operation::OperationKind;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Accumulated totals for one pipeline phase
struct PhaseTotals {
    add_early: f64,
    multiply_additive: f64,
    multiply_multiplicative: f64,
    add_late: f64,
    floor: Option<f64>,
    ceiling: Option<f64>,
    set: Option<f64>,
}

impl PhaseTotals {
    fn new() -> Self {
        PhaseTotals {
            add_early: 0.0,
            multiply_additive: 1.0,
            multiply_multiplicative: 1.0,
            add_late: 0.0,
            floor: None,
            ceiling: None,
            set: None,
        }
    }

    /// All floors must hold simultaneously, so the largest wins
    fn raise_floor(&mut self, magnitude: f64) {
        self.floor = Some(match self.floor {
            Some(floor) => floor.max(magnitude),
            None => magnitude,
        });
    }

    /// All ceilings must hold simultaneously, so the smallest wins
    fn lower_ceiling(&mut self, magnitude: f64) {
        self.ceiling = Some(match self.ceiling {
            Some(ceiling) => ceiling.min(magnitude),
            None => magnitude,
        });
    }

    /// Run the seven-step sequence against a starting value
    fn apply(&self, start: f64) -> f64 {
        let mut value = start;
        value += self.add_early;
        value *= self.multiply_additive;
        value *= self.multiply_multiplicative;
        value += self.add_late;
        if let Some(floor) = self.floor {
            if value < floor {
                value = floor;
            }
        }
        if let Some(ceiling) = self.ceiling {
            if value > ceiling {
                value = ceiling;
            }
        }
        if let Some(set) = self.set {
            value = set;
        }
        value
    }
}

/// A numeric attribute: a base value, a mutable base offset, and a
/// collection of [`Modifier`]s that together determine [`Attribute::value`]
///
/// The derived value is recomputed lazily and memoized; every mutation
/// invalidates the memo. The cache lives in a [`Cell`] so reads work through
/// `&self`, which also makes the type `!Sync` - an attribute belongs to a
/// single owner, and any sharing across threads must be serialized by the
/// owning system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    base: f64,
    base_offset: f64,
    modifiers: Vec<Modifier>,
    #[serde(skip)]
    cache: Cell<Option<f64>>,
}

impl Attribute {
    /// Create an attribute with the given base value and no modifiers
    pub fn new(base: f64) -> Self {
        Attribute {
            base,
            base_offset: 0.0,
            modifiers: Vec::new(),
            // No modifiers yet, so the value is known up front
            cache: Cell::new(Some(base)),
        }
    }

    /// The effective base value: construction base plus accumulated offset
    pub fn effective_base(&self) -> f64 {
        self.base + self.base_offset
    }

    /// The modifiers currently attached, in insertion order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// How many modifiers are currently attached
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// The derived value after running all modifiers through the pipeline
    ///
    /// Cached until the next mutation; repeated reads are O(1).
    pub fn value(&self) -> f64 {
        if let Some(cached) = self.cache.get() {
            return cached;
        }
        let value = self.compute();
        self.cache.set(Some(value));
        value
    }

    fn compute(&self) -> f64 {
        let effective_base = self.effective_base();
        if self.modifiers.is_empty() {
            return effective_base;
        }

        let mut base = PhaseTotals::new();
        let mut total = PhaseTotals::new();

        for modifier in &self.modifiers {
            let magnitude = modifier.magnitude();
            match modifier.operation() {
                OperationKind::AddBaseEarly => base.add_early += magnitude,
                OperationKind::MultiplyBaseAdditive => base.multiply_additive += magnitude,
                OperationKind::MultiplyBaseMultiplicative => {
                    base.multiply_multiplicative *= magnitude
                }
                OperationKind::AddBaseLate => base.add_late += magnitude,
                OperationKind::MinBase => base.raise_floor(magnitude),
                OperationKind::MaxBase => base.lower_ceiling(magnitude),
                OperationKind::SetBase => base.set = Some(magnitude),
                OperationKind::AddTotalEarly => total.add_early += magnitude,
                OperationKind::MultiplyTotalAdditive => total.multiply_additive += magnitude,
                OperationKind::MultiplyTotalMultiplicative => {
                    total.multiply_multiplicative *= magnitude
                }
                OperationKind::AddTotalLate => total.add_late += magnitude,
                OperationKind::MinTotal => total.raise_floor(magnitude),
                OperationKind::MaxTotal => total.lower_ceiling(magnitude),
                OperationKind::SetTotal => total.set = Some(magnitude),
            }
        }

        total.apply(base.apply(effective_base))
    }

    fn invalidate(&mut self) {
        self.cache.set(None);
    }

    /// Attach a modifier
    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
        self.invalidate();
    }

    /// Attach several modifiers at once
    pub fn add_modifiers<I>(&mut self, modifiers: I)
    where
        I: IntoIterator<Item = Modifier>,
    {
        self.modifiers.extend(modifiers);
        self.invalidate();
    }

    /// Build a modifier from a magnitude and canonical operation name, then
    /// attach it
    ///
    /// Fails with [`AttributeError::InvalidOperationName`] for an
    /// unrecognized name, leaving the attribute untouched.
    pub fn add_modifier_named(
        &mut self,
        magnitude: f64,
        operation: &str,
    ) -> Result<(), AttributeError> {
        let modifier = Modifier::parse(magnitude, operation)?;
        self.add_modifier(modifier);
        Ok(())
    }

    /// Detach the first modifier equal to the given one
    ///
    /// Multiset semantics: with duplicates attached, one call removes
    /// exactly one instance. Returns whether a modifier was removed; the
    /// cached value is only invalidated when one was.
    pub fn remove_modifier(&mut self, modifier: &Modifier) -> bool {
        match self.modifiers.iter().position(|m| m == modifier) {
            Some(index) => {
                self.modifiers.remove(index);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Detach one instance of each given modifier, returning how many were
    /// actually removed
    pub fn remove_modifiers<I>(&mut self, modifiers: I) -> usize
    where
        I: IntoIterator<Item = Modifier>,
    {
        modifiers
            .into_iter()
            .filter(|modifier| self.remove_modifier(modifier))
            .count()
    }

    /// Detach the first modifier matching a magnitude and canonical
    /// operation name
    ///
    /// Fails with [`AttributeError::InvalidOperationName`] for an
    /// unrecognized name; otherwise behaves like [`Attribute::remove_modifier`].
    pub fn remove_modifier_named(
        &mut self,
        magnitude: f64,
        operation: &str,
    ) -> Result<bool, AttributeError> {
        let modifier = Modifier::parse(magnitude, operation)?;
        Ok(self.remove_modifier(&modifier))
    }

    /// Set the effective base to exactly `value` by adjusting the offset
    pub fn set_base_value(&mut self, value: f64) {
        self.base_offset = value - self.base;
        self.invalidate();
    }

    /// Shift the effective base by `delta`
    pub fn change_base_value(&mut self, delta: f64) {
        self.base_offset += delta;
        self.invalidate();
    }
}

fn occurrences(modifiers: &[Modifier], target: &Modifier) -> usize {
    modifiers.iter().filter(|m| *m == target).count()
}

impl PartialEq for Attribute {
    /// Equal effective base (within epsilon) and equal modifier multisets,
    /// irrespective of insertion order
    fn eq(&self, other: &Self) -> bool {
        if (self.effective_base() - other.effective_base()).abs() >= MAGNITUDE_EPSILON {
            return false;
        }
        if self.modifiers.len() != other.modifiers.len() {
            return false;
        }
        self.modifiers
            .iter()
            .all(|m| occurrences(&self.modifiers, m) == occurrences(&other.modifiers, m))
    }
}
