pub mod notification_service;

pub use notification_service::{use_notifications, Notice, NoticeKind, NotificationService};
