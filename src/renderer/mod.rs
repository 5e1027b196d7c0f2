//! Notification list rendering.
//!
//! [`NotificationRenderer`] fetches the list from a [`NotificationSource`]
//! and rebuilds a [`ListContainer`] handed to it by the host. The server's
//! HTML page reuses [`render_notifications`] so both paths produce the same
//! markup.

pub mod client;
pub mod dom;
pub mod error;
pub mod render;
pub mod types;

pub use client::{ClientConfig, HttpNotificationSource, NotificationSource};
pub use dom::{Document, Element, ListContainer, Node};
pub use error::RenderError;
pub use render::{
    mark_as_read_href, render_item, render_notifications, NotificationRenderer, RenderSummary,
    LIST_CONTAINER_ID, MARK_AS_READ_LABEL, NOTIFICATIONS_PATH,
};
pub use types::{Notification, NotificationFeed, NotificationId};
