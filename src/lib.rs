//! `issue_tracker` - an in-memory issue tracker served over HTTP.
//!
//! Issues live in a mutex-guarded map inside [`storage::IssueStore`]; the
//! [`server`] module exposes create, read, update and list over JSON.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod server;
pub mod storage;
pub mod validation;

pub use error::{Result, StructuredError, TrackerError};
