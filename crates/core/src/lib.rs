//! `cartonforge-core` — domain building blocks shared by the label engine.
//!
//! Pure types only: identifiers, the entity trait and the domain error model.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, find_entity, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{EntryId, SplitId};
