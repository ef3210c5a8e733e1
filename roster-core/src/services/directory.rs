//! Directory view logic
//!
//! One controller serves both the employee and the admin console: every
//! per-view difference (endpoints, toggle action, display copy) comes from
//! the [`Scope`] passed in, never from branching here.
//!
//! Users see one-based page numbers; the wire is zero-based. The conversion
//! happens in this module and nowhere else.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Scope, StaffMember};
use crate::ports::DirectoryProvider;

/// A renderable snapshot of one directory view
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub scope: Scope,
    pub rows: Vec<StaffMember>,
    /// One-based page number. Meaningless while a search is active.
    pub page: u64,
    /// Total pages, at least 1. Zero while a search is active.
    pub total_pages: u64,
    /// The active search query, if any
    pub query: Option<String>,
}

impl PageView {
    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a previous page exists. Always false during a search:
    /// search results are a single unpaginated set.
    pub fn has_prev(&self) -> bool {
        !self.is_search() && self.page > 1
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        !self.is_search() && self.page < self.total_pages
    }
}

/// One-shot directory operations
///
/// Every method validates, delegates to the provider and returns a fresh
/// result; state across calls (current page, pending deletion) lives in
/// [`DirectoryView`].
pub struct DirectoryService {
    provider: Arc<dyn DirectoryProvider>,
}

impl DirectoryService {
    pub fn new(provider: Arc<dyn DirectoryProvider>) -> Self {
        Self { provider }
    }

    /// Fetch one page of the scope, validating the one-based page number
    /// against the current page count.
    pub fn page_view(&self, scope: Scope, page: u64) -> Result<PageView> {
        let total_pages = self.provider.page_count(scope)?.max(1);

        if page < 1 || page > total_pages {
            return Err(Error::validation(format!(
                "Page {} out of range (1-{})",
                page, total_pages
            )));
        }

        let rows = self.provider.fetch_page(scope, page - 1)?;

        Ok(PageView {
            scope,
            rows,
            page,
            total_pages,
            query: None,
        })
    }

    /// Search the scope. Results are a single unpaginated set.
    pub fn search_view(&self, scope: Scope, query: &str) -> Result<PageView> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Search query cannot be empty"));
        }

        let rows = self.provider.search(scope, query)?;

        Ok(PageView {
            scope,
            rows,
            page: 1,
            total_pages: 0,
            query: Some(query.to_string()),
        })
    }

    /// Apply the scope's role toggle to one user
    pub fn toggle_role(&self, scope: Scope, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::validation("Email cannot be empty"));
        }
        self.provider.toggle_role(scope, email)
    }

    /// Delete a user record
    pub fn delete_user(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::validation("Email cannot be empty"));
        }
        self.provider.delete_user(email)
    }

    /// Page counts for both scopes, cheap reachability probe included
    pub fn status(&self) -> Result<DirectoryStatus> {
        Ok(DirectoryStatus {
            employee_pages: self.provider.page_count(Scope::Employees)?,
            admin_pages: self.provider.page_count(Scope::Admins)?,
        })
    }

    /// Open a stateful view of the scope, loaded on page 1
    pub fn browse(&self, scope: Scope) -> Result<DirectoryView> {
        DirectoryView::open(Arc::clone(&self.provider), scope)
    }
}

/// Directory totals as reported by the server
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryStatus {
    pub employee_pages: u64,
    pub admin_pages: u64,
}

/// Stateful browse controller for the interactive console.
///
/// Holds what the original views kept on screen: the current page, the
/// total, an optional live search and at most one row marked for deletion
/// awaiting confirmation.
pub struct DirectoryView {
    provider: Arc<dyn DirectoryProvider>,
    scope: Scope,
    page: u64,
    total_pages: u64,
    rows: Vec<StaffMember>,
    query: Option<String>,
    pending_delete: Option<String>,
}

impl DirectoryView {
    /// Open the view on page 1
    pub fn open(provider: Arc<dyn DirectoryProvider>, scope: Scope) -> Result<Self> {
        let mut view = Self {
            provider,
            scope,
            page: 1,
            total_pages: 1,
            rows: Vec::new(),
            query: None,
            pending_delete: None,
        };
        view.refresh()?;
        Ok(view)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn rows(&self) -> &[StaffMember] {
        &self.rows
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.query.is_none() && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.query.is_none() && self.page < self.total_pages
    }

    /// Re-fetch the current view.
    ///
    /// In paged mode the page count is re-read first and the page number
    /// clamped into range, so deleting the last row of the last page lands
    /// on the new last page instead of past the end. An active search is
    /// simply re-run.
    pub fn refresh(&mut self) -> Result<()> {
        match self.query.clone() {
            Some(query) => {
                self.rows = self.provider.search(self.scope, &query)?;
            }
            None => {
                self.total_pages = self.provider.page_count(self.scope)?.max(1);
                self.page = self.page.min(self.total_pages);
                self.rows = self.provider.fetch_page(self.scope, self.page - 1)?;
            }
        }
        Ok(())
    }

    /// Move forward one page. Does nothing on the last page.
    pub fn next_page(&mut self) -> Result<()> {
        if self.has_next() {
            self.page += 1;
            self.refresh()?;
        }
        Ok(())
    }

    /// Move back one page. Does nothing on page 1.
    pub fn prev_page(&mut self) -> Result<()> {
        if self.has_prev() {
            self.page -= 1;
            self.refresh()?;
        }
        Ok(())
    }

    /// Jump to a one-based page. Out-of-range input is an error, unlike
    /// the silent clamping refresh does for pages that shrank under us.
    pub fn goto(&mut self, page: u64) -> Result<()> {
        if self.is_search() {
            return Err(Error::validation("Clear the search before changing pages"));
        }
        if page < 1 || page > self.total_pages {
            return Err(Error::validation(format!(
                "Page {} out of range (1-{})",
                page, self.total_pages
            )));
        }
        self.page = page;
        self.refresh()
    }

    /// Enter search mode; pagination is suspended until the search clears.
    /// Blank input leaves search mode instead.
    pub fn set_search(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return self.clear_search();
        }
        self.query = Some(query.to_string());
        self.refresh()
    }

    /// Leave search mode and restore the remembered page
    pub fn clear_search(&mut self) -> Result<()> {
        self.query = None;
        self.refresh()
    }

    /// Mark one row for deletion. The actual request is only sent by
    /// [`DirectoryView::confirm_delete`].
    pub fn mark_for_delete(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::validation("Email cannot be empty"));
        }
        self.pending_delete = Some(email.to_string());
        Ok(())
    }

    /// Drop the pending deletion without sending anything
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Send the pending deletion.
    ///
    /// The mark is cleared whether the request succeeds or fails. Returns
    /// the deleted email, or `None` when nothing was marked.
    pub fn confirm_delete(&mut self) -> Result<Option<String>> {
        let Some(email) = self.pending_delete.take() else {
            return Ok(None);
        };
        self.provider.delete_user(&email)?;
        self.refresh()?;
        Ok(Some(email))
    }

    /// Apply this view's role toggle and refresh
    pub fn toggle_role(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::validation("Email cannot be empty"));
        }
        self.provider.toggle_role(self.scope, email)?;
        self.refresh()
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> PageView {
        PageView {
            scope: self.scope,
            rows: self.rows.clone(),
            page: self.page,
            total_pages: if self.is_search() { 0 } else { self.total_pages },
            query: self.query.clone(),
        }
    }
}
