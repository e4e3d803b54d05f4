use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateUserReq, ListUsersQuery, UpdateUserReq, UserDto, UserListDto,
};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// List users with pagination
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListDto>, ApiError> {
    let page = svc.list_users(query.skip, query.take).await?;
    Ok(Json(UserListDto::from(page)))
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, ApiError> {
    let user = svc.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Option<Json<CreateUserReq>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(req)) = body else {
        return Err(ApiError::missing_body());
    };

    let user = svc.create_user(req.into()).await?;
    info!(user_id = %user.id, "Created user");

    let location = format!("/api/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserDto::from(user)),
    ))
}

/// Update an existing user with a partial patch
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    body: Option<Json<UpdateUserReq>>,
) -> Result<Json<UserDto>, ApiError> {
    let Some(Json(req)) = body else {
        return Err(ApiError::missing_body());
    };

    let user = svc.update_user(id, req.into()).await?;
    Ok(Json(UserDto::from(user)))
}

/// Delete a user by ID
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
