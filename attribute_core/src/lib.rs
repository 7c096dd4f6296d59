//! attribute_core - Attribute and modifier aggregation for game entities
//!
//! This library provides:
//! - Attribute: a base value plus modifiers, with a lazily cached derived value
//! - Modifier: an immutable magnitude paired with an operation kind
//! - OperationKind: the closed set of 14 pipeline operations
//!
//! Evaluation is deterministic: modifiers are grouped by operation category
//! and applied in a fixed pipeline order (additive, multiplicative, clamp,
//! override), first against the base value and then against the running
//! total. Insertion order never changes the result.
//!
//! # Quick Start
//!
//! ```rust
//! use attribute_core::prelude::*;
//!
//! // Movement speed: base 100, +20 flat, +50% from a buff
//! let mut speed = Attribute::new(100.0);
//! speed.add_modifier(Modifier::new(20.0, OperationKind::AddBaseEarly));
//! speed.add_modifier(Modifier::new(0.5, OperationKind::MultiplyBaseAdditive));
//! assert_eq!(speed.value(), 180.0);
//!
//! // Effects can also be keyed by name, e.g. from data files
//! speed.add_modifier_named(150.0, "MaxTotal").unwrap();
//! assert_eq!(speed.value(), 150.0);
//! ```

pub mod attribute;
pub mod error;
pub mod modifier;
pub mod operation;
pub mod prelude;

// Re-export core types for convenience
pub use attribute::Attribute;
pub use error::AttributeError;
pub use modifier::Modifier;
pub use operation::{OperationKind, Phase};
