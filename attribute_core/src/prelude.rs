//! Prelude module for convenient imports
//!
//! ```rust
//! use attribute_core::prelude::*;
//! ```

pub use crate::attribute::Attribute;
pub use crate::error::AttributeError;
pub use crate::modifier::Modifier;
pub use crate::operation::{OperationKind, Phase};
