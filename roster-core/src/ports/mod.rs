//! Port definitions
//!
//! Traits that decouple the view logic from concrete backends.

mod directory;

pub use directory::DirectoryProvider;
