//! Attribute modifiers: temporary or innate adjustments to a squaddie's stats.
//!
//! # Stacking
//!
//! ```text
//! same type, same source      → the largest bonus (or worst penalty) wins
//! same type, different source → amounts add up
//! opposite signs              → net out; a net of zero is not reported
//! ```

mod modifier;
mod stacking;
mod types;

pub use modifier::AttributeModifier;
pub use stacking::{
    AttributeTypeAndAmount, calculate_attribute_amount, calculate_current_attribute_modifiers,
};
pub use types::{AttributeSource, AttributeType};
