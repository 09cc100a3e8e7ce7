//! Data sources for portal collections
//!
//! Every view reads its collection through a [`DataSource`]:
//! - [`RestSource`] talks to the portal REST API
//! - [`StubSource`] serves in-memory demo data
//! - [`FallbackSource`] tries one source and falls back to another on outage

pub mod adapter;
pub mod error;
pub mod fallback;
pub mod fixtures;
pub mod rest;
pub mod source;
pub mod stub;

pub use adapter::Resource;
pub use error::{GENERIC_FAILURE_MESSAGE, Result, SourceError};
pub use fallback::FallbackSource;
pub use fixtures::Fixture;
pub use rest::{RestSettings, RestSource};
pub use source::{DataSource, FetchQuery};
pub use stub::StubSource;
