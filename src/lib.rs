//! Browser-automation engine for Codeforces.
//!
//! `cfdriver` drives one shared headless browser to list contests and
//! problems, fetch statement fragments, manage the account session, submit
//! answers and wait for their verdicts. Hosts talk to the [`Codeforces`]
//! facade, provide the collaborators in [`store`], and get plain data
//! records from [`model`] back.
//!
//! The scraped site's markup is an unversioned contract: every selector
//! lives behind a named fragment, so when the markup drifts the failure
//! names exactly one extraction point.

#![warn(clippy::all)]

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod lang;
mod macros;
pub mod model;
pub mod page;
pub mod scrape;
pub mod service;
pub mod store;

pub use api::{Codeforces, LoginOptions, SubmitRequest};
pub use config::{Config, PollPolicy};
pub use error::{Error, Result};
