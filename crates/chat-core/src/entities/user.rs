//! User entity - represents a registered chat user

/// User entity as seen by the gateway.
///
/// The password hash lives next to the user in the directory but is never
/// part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    /// Create a new User
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Label used by the active-user listing: `<id>-<username>`
    pub fn active_label(&self) -> String {
        format!("{}-{}", self.id, self.username)
    }
}
