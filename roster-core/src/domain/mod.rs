//! Core domain entities
//!
//! Pure data structures shared across the crate - no I/O or external
//! dependencies.

mod scope;
mod staff;
pub mod result;

pub use scope::Scope;
pub use staff::{Role, StaffMember};
