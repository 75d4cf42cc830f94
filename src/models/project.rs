use chrono::{DateTime, Utc};

/// A managed project as held in the collection store.
///
/// `id` is server-assigned and opaque; projects are unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
