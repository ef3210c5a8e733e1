//! Service layer
//!
//! View logic and local state. Each service focuses on one concern: the
//! directory views, the cached session, the activity log.

pub mod activity;
mod directory;
mod session;

pub use activity::{ActivityLog, LogEntry, LogEvent};
pub use directory::{DirectoryService, DirectoryStatus, DirectoryView, PageView};
pub use session::{Session, SessionStore};
