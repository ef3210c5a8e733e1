//! Directory REST client
//!
//! Speaks the staff directory backend's HTTP dialect: zero-based page
//! indices on the wire, bare-number page counts, 404 for an empty search
//! result, and a boolean body telling whether a role toggle was applied.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Scope, StaffMember};
use crate::ports::DirectoryProvider;

/// Staff directory API client
#[derive(Debug)]
pub struct DirectoryClient {
    client: Client,
    base_url: Url,
}

impl DirectoryClient {
    /// Create a new client for the given server URL
    pub fn new(server_url: &str) -> Result<Self> {
        let base_url = Url::parse(server_url.trim_end_matches('/'))
            .map_err(|e| Error::config(format!("Invalid server URL '{}': {}", server_url, e)))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(Error::config(format!(
                "Server URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Server URL this client talks to
    pub fn server_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    ///
    /// Segment-wise extension keeps user input (search queries, emails)
    /// from being read as extra path structure.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("Server URL cannot hold path segments".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_rows(&self, url: Url) -> Result<Vec<StaffMember>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        response
            .json()
            .map_err(|e| Error::api(format!("Failed to parse directory response: {}", e)))
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::connection("Connection timed out after 30 seconds")
        } else if error.is_connect() {
            Error::connection(format!(
                "Unable to connect to the directory server at {}",
                self.base_url
            ))
        } else {
            Error::connection(format!("Directory request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200..=299 => Ok(()),
            404 => Err(Error::not_found("Directory resource not found")),
            status => Err(Error::api(format!("Directory server error: HTTP {}", status))),
        }
    }
}

impl DirectoryProvider for DirectoryClient {
    fn fetch_page(&self, scope: Scope, index: u64) -> Result<Vec<StaffMember>> {
        let index = index.to_string();
        let url = self.endpoint(
            scope
                .base_segments()
                .iter()
                .copied()
                .chain(["page", index.as_str()]),
        )?;
        self.get_rows(url)
    }

    fn page_count(&self, scope: Scope) -> Result<u64> {
        let url = self.endpoint(scope.base_segments().iter().copied().chain(["page"]))?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        // The count comes back as a bare JSON number
        response
            .json()
            .map_err(|e| Error::api(format!("Failed to parse page count: {}", e)))
    }

    fn search(&self, scope: Scope, query: &str) -> Result<Vec<StaffMember>> {
        let url = self.endpoint(
            scope
                .base_segments()
                .iter()
                .copied()
                .chain(["search", query]),
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        // The backend reports an empty result set as 404
        if response.status().as_u16() == 404 {
            return Ok(Vec::new());
        }

        self.check_response_status(&response)?;

        response
            .json()
            .map_err(|e| Error::api(format!("Failed to parse search response: {}", e)))
    }

    fn toggle_role(&self, scope: Scope, email: &str) -> Result<()> {
        let url = self.endpoint(scope.toggle_segments().iter().copied().chain([email]))?;

        let response = self
            .client
            .patch(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        if response.status().as_u16() == 404 {
            return Err(Error::not_found(format!("User {} not found", email)));
        }

        self.check_response_status(&response)?;

        // A success status with a `false` body means the server declined
        // the change
        let applied: bool = response
            .json()
            .map_err(|e| Error::api(format!("Failed to parse role toggle response: {}", e)))?;

        if applied {
            Ok(())
        } else {
            Err(Error::api(format!(
                "The server declined the role change for {}",
                email
            )))
        }
    }

    fn delete_user(&self, email: &str) -> Result<()> {
        // Deletion always goes through the admin sub-resource
        let url = self.endpoint(["user", "admin", email])?;

        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        if response.status().as_u16() == 404 {
            return Err(Error::not_found(format!("User {} not found", email)));
        }

        self.check_response_status(&response)
    }
}
