use async_trait::async_trait;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
}

/// Toast-style message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub text: String,
}

impl Notification {
    /// Success notification.
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Error notification.
    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Asks the user to confirm a destructive action.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Resolves to true when the user accepts `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Shows notifications to the user.
pub trait Notify: Send + Sync {
    /// Displays `note`; must not block.
    fn notify(&self, note: Notification);
}

/// Answers every confirmation with a fixed choice.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notify for SilentNotifier {
    fn notify(&self, _note: Notification) {}
}
