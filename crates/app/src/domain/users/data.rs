//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password_hash: String,
    pub is_staff: bool,
}
