//! List view engine: collection view state, mutation bridge, controller
//!
//! Data flows from a [`portal_sources::DataSource`] into a
//! [`CollectionView`] (filters + paginator). Writes go through the
//! [`MutationBridge`], and a successful write makes the [`ListController`]
//! refetch the collection.

pub mod controller;
pub mod mutation;
pub mod notify;
pub mod view;

pub use controller::ListController;
pub use mutation::{Mutation, MutationBridge, MutationOutcome};
pub use notify::{Level, LogNotifier, Notification, Notifier, ToastQueue};
pub use view::CollectionView;
