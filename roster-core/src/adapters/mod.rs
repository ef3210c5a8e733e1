//! Adapter implementations
//!
//! Concrete implementations of the ports:
//! - rest: blocking HTTP client for the directory backend
//! - mock_server: in-process directory server for tests

pub mod rest;

#[cfg(test)]
pub mod mock_server;
