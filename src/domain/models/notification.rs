#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// Transient message for the user, such as a failed request or a copied
/// citation. Notifications never end up in the chat transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, description: &str) -> Notification {
        return Notification {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        };
    }

    pub fn info(title: &str, description: &str) -> Notification {
        return Notification::new(NotificationKind::Info, title, description);
    }

    pub fn success(title: &str, description: &str) -> Notification {
        return Notification::new(NotificationKind::Success, title, description);
    }

    pub fn error(title: &str, description: &str) -> Notification {
        return Notification::new(NotificationKind::Error, title, description);
    }
}
