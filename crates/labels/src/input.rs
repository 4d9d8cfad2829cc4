//! Parsing of quantities typed by the user.

use core::num::IntErrorKind;

use cartonforge_core::{DomainError, DomainResult};

/// Parse a carton quantity typed into a form field.
///
/// Accepts an optional sign and decimal digits, surrounding whitespace
/// ignored. Range checks against the line total happen later, in
/// [`crate::SplitSet::update_split_quantity`]; negative values are passed
/// through so they can be clamped there.
pub fn parse_quantity_input(raw: &str) -> DomainResult<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::validation("quantity is required"));
    }

    text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            DomainError::validation(format!("quantity out of range: {text}"))
        }
        _ => DomainError::validation(format!("quantity must be a whole number: {text}")),
    })
}
