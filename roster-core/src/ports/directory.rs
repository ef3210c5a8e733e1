//! Directory provider port

use crate::domain::result::Result;
use crate::domain::{Scope, StaffMember};

/// Staff directory operations
///
/// The view controller talks to this trait instead of the HTTP client so
/// tests can drive it with an in-memory implementation. Page indices are
/// zero-based here, matching the wire; the one-based numbering users see is
/// a view concern.
pub trait DirectoryProvider: Send + Sync {
    /// Fetch one page of the scope
    fn fetch_page(&self, scope: Scope, index: u64) -> Result<Vec<StaffMember>>;

    /// Total number of pages the scope currently has
    fn page_count(&self, scope: Scope) -> Result<u64>;

    /// Search the whole scope, not just the current page.
    ///
    /// "No matches" is an empty vec, never an error.
    fn search(&self, scope: Scope, query: &str) -> Result<Vec<StaffMember>>;

    /// Apply the scope's role toggle to one user: promote for
    /// [`Scope::Employees`], demote for [`Scope::Admins`].
    fn toggle_role(&self, scope: Scope, email: &str) -> Result<()>;

    /// Delete a user record. Deletion is always routed through the admin
    /// sub-resource, whichever view it was requested from.
    fn delete_user(&self, email: &str) -> Result<()>;
}
