use serde::Deserialize;
use std::fmt;

/// Server-assigned identifier. The list endpoint may send either a number
/// or a string; both are accepted and only used to build link targets.
/// Numbers keep their JSON form, so ids beyond `i64` still decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NotificationId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationId::Number(n) => write!(f, "{}", n),
            NotificationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NotificationId {
    fn from(id: i64) -> Self {
        NotificationId::Number(id.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub timestamp: String,
    pub is_read: bool,
}

/// Body of `GET /notifications/`. Extra keys (counts, paging) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
}
