use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure user model for the directory engine (no serde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw input for creating a user: a bag of optional fields as received from
/// the caller. Required fields must survive normalization; the validator
/// decides, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update for a user. `None` means "leave unchanged"; a supplied
/// blank value is invalid input, never "clear the field".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// True when no field at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.title.is_none()
            && self.phone.is_none()
            && self.is_active.is_none()
    }
}
