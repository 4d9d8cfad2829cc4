//! Carton split engine for shipping labels.
//!
//! This crate contains the label business rules: splitting order lines into
//! cartons, keeping carton quantities consistent with the line totals, and
//! assembling one printable label per carton. Pure domain logic (no IO, no
//! HTTP, no rendering).

pub mod input;
pub mod order;
pub mod print;
pub mod selection;
pub mod split;
pub mod store;

pub use input::parse_quantity_input;
pub use order::{OrderData, OrderLine, OrderLinePayload, OrderPayload, ProxyResponse};
pub use print::{
    PrintError, PrintItem, SplitMismatch, build_print_items, validate_split_quantities,
};
pub use selection::Selection;
pub use split::{Rejection, Split, SplitOutcome, SplitSet};
pub use store::SplitStore;
