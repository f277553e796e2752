//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// First and last name joined, or the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();

        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// A user together with the stored password hash, used only for login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentialsRecord {
    pub(crate) user: UserRecord,
    pub(crate) password_hash: String,
}
