use serde::Serialize;

/// A human readable status message about the wallet connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Notification {
    pub message: String,
    pub description: String,
}

/// Where the connection status messages are sent to.
///
/// Notifying is fire and forget, a sink must not fail.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Sink writing the notifications to the `tracing` logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = %notification.message,
            description = %notification.description,
            "wallet notification"
        );
    }
}
