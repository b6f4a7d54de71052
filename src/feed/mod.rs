//! The article-feed controller.
//!
//! [`spawn`] starts a `FeedController` on the tokio runtime and returns a
//! `FeedHandle`.  The handle is the only way in or out: events go in
//! through `FeedHandle::send`, and [`FeedState`] snapshots come out of a
//! `watch` channel after every committed change.
//!
//! ## For contributors
//!
//! * New user intents are a [`FeedEvent`] variant plus one match arm in
//!   `FeedController::handle_event`.
//! * Anything asynchronous the controller starts must report back through
//!   its internal signal channel with a ticket, never by touching state
//!   from another task.

mod controller;
mod event;
mod state;

pub use controller::spawn;
pub use event::FeedEvent;
pub use state::{FeedState, Query};
