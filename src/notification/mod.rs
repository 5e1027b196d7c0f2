// Declare submodules
pub mod notification_models;
pub mod notification_dto;
pub mod notification_repository;
pub mod notification_handlers;
pub mod notification_page;
pub mod notification_service;
pub mod routes;

// Re-export public items
pub use notification_models::{NewNotification, Notification, NotificationType, RelatedObject};
pub use notification_repository::NotificationRepository;
pub use notification_service::{NotificationPage, NotificationService};
pub use routes::notification_routes;
