//! Directory view scopes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which slice of the staff directory a view shows.
///
/// The employee and admin consoles are the same view logic parameterized by
/// this enum: REST sub-resource paths, the role-toggle action, and the
/// display copy all hang off the scope, so nothing else in the codebase
/// branches on employees-versus-admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Employees,
    Admins,
}

impl Scope {
    /// Path segments all listing endpoints of this scope live under.
    ///
    /// Pages are at `<base>/page/{n}`, the page count at `<base>/page` and
    /// search at `<base>/search/{query}`.
    pub fn base_segments(&self) -> &'static [&'static str] {
        match self {
            Scope::Employees => &["user"],
            Scope::Admins => &["user", "admin"],
        }
    }

    /// Path segments of this scope's role-toggle endpoint.
    ///
    /// The toggle is a PATCH on `<toggle>/{email}`: promoting goes through
    /// the employee sub-resource, demoting through the admin one.
    pub fn toggle_segments(&self) -> &'static [&'static str] {
        match self {
            Scope::Employees => &["user", "employee"],
            Scope::Admins => &["user", "admin"],
        }
    }

    /// What one record of this scope is called in prompts
    pub fn entity_name(&self) -> &'static str {
        match self {
            Scope::Employees => "employee",
            Scope::Admins => "admin",
        }
    }

    /// Message shown when a page or search comes back empty
    pub fn empty_message(&self) -> &'static str {
        match self {
            Scope::Employees => "No employees found.",
            Scope::Admins => "No admins found.",
        }
    }

    /// Label of this scope's role-toggle action
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Scope::Employees => "Make admin",
            Scope::Admins => "Remove admin",
        }
    }

    /// Command-style name of the role toggle
    pub fn toggle_verb(&self) -> &'static str {
        match self {
            Scope::Employees => "promote",
            Scope::Admins => "demote",
        }
    }

    /// How a successful toggle reads, appended after the email
    pub fn toggle_done_message(&self) -> &'static str {
        match self {
            Scope::Employees => "is now an admin",
            Scope::Admins => "is no longer an admin",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Employees => "employees",
            Scope::Admins => "admins",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
