//! Core domain models and logic for portal
//!
//! This crate contains:
//! - Domain records (Ticket, ContentItem, User)
//! - Filter state and predicates
//! - Filter reducer and paginator (pure, synchronous)
//! - Small presentation helpers (table cells, status summaries, relative time)

pub mod content;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod present;
pub mod record;
pub mod reducer;
pub mod relative_time;
pub mod summary;
pub mod ticket;
pub mod user;
pub mod view;

pub use content::ContentItem;
pub use error::{Error, Result};
pub use filter::{DateBoundaries, DateBucket, EvalContext, FilterState, Selection};
pub use paginate::Paginator;
pub use present::{EMPTY_CELL, Present};
pub use record::{Field, Record, RecordKind};
pub use reducer::{Collection, filter_collection, filter_records};
pub use relative_time::relative_time;
pub use ticket::Ticket;
pub use user::User;
pub use view::{DerivedView, derive_view};
