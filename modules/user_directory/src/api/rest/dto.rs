use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::service::UserPage;

/// REST DTO for user representation. Optional fields serialize as explicit
/// `null` so the wire shape is stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
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

/// REST DTO for creating a user. Every field arrives optional; the validator
/// decides which must resolve to values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// REST DTO for updating a user (partial patch).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// REST DTO for one page of the user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListDto {
    pub items: Vec<UserDto>,
    pub total: usize,
    pub skip: i64,
    pub take: i64,
}

/// REST DTO for list query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListUsersQuery {
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            department: user.department,
            title: user.title,
            phone: user.phone,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            department: req.department,
            title: req.title,
            phone: req.phone,
            is_active: req.is_active,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            department: req.department,
            title: req.title,
            phone: req.phone,
            is_active: req.is_active,
        }
    }
}

impl From<UserPage> for UserListDto {
    fn from(page: UserPage) -> Self {
        Self {
            items: page.items.into_iter().map(UserDto::from).collect(),
            total: page.total,
            skip: page.skip,
            take: page.take,
        }
    }
}
