//! User endpoints: own profile and staff user management.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use domain::models::user::{AdminUpdateUserRequest, UpdateProfileRequest, UserFilter, UserResponse};
use domain::models::{ListResponse, Role, User};
use persistence::repositories::UserRepository;
use serde::Deserialize;
use shared::pagination::PageRequest;
use validator::Validate;

use super::non_empty;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, UserAuth};

const USER_NOT_FOUND: &str = "user not found";
const NO_PERMISSION: &str = "you have no permission to perform this action";

/// Query parameters for `GET /user/users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    #[serde(rename = "page-size")]
    pub page_size: Option<String>,
    #[serde(rename = "mobile-number")]
    pub mobile_number: Option<String>,
    #[serde(rename = "full-name")]
    pub full_name: Option<String>,
}

impl ListUsersQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.page_size.as_deref())
    }

    fn into_filter(self) -> UserFilter {
        UserFilter {
            mobile_number: non_empty(self.mobile_number),
            full_name: non_empty(self.full_name),
        }
    }
}

async fn load_user(users: &UserRepository, id: i64) -> Result<User, ApiError> {
    users
        .find_by_id(id)
        .await?
        .map(User::from)
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}

/// `GET /user/me`.
pub async fn me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<ApiJson<UserResponse>, ApiError> {
    let users = UserRepository::new(state.pool);
    let user = load_user(&users, auth.user_id).await?;
    Ok(ApiJson(user.into()))
}

/// `PUT /user/me`: changes the caller's display name.
pub async fn update_me(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<ApiJson<UserResponse>, ApiError> {
    request.validate()?;

    let user: User = UserRepository::new(state.pool)
        .update_full_name(auth.user_id, &request.full_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?
        .into();

    Ok(ApiJson(user.into()))
}

/// `DELETE /user/me`: soft-deletes the caller's account.
pub async fn delete_me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<StatusCode, ApiError> {
    if !UserRepository::new(state.pool).soft_delete(auth.user_id).await? {
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id = auth.user_id, "User deleted own account");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /user/users`: paginated, filterable user list for staff.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiJson<ListResponse<UserResponse>>, ApiError> {
    let page = query.page_request();
    let filter = query.into_filter();
    let users = UserRepository::new(state.pool);

    let mobile_number = filter.mobile_number.as_deref();
    let full_name = filter.full_name.as_deref();

    let total = users.count(mobile_number, full_name).await?;
    let rows = users
        .list(mobile_number, full_name, page.limit(), page.offset())
        .await?;

    let result = rows
        .into_iter()
        .map(|row| UserResponse::from(User::from(row)))
        .collect();

    Ok(ApiJson(ListResponse::new(result, total, page)))
}

/// `GET /user/users/:id`.
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiJson<UserResponse>, ApiError> {
    let users = UserRepository::new(state.pool);
    let user = load_user(&users, id).await?;
    Ok(ApiJson(user.into()))
}

/// `PUT /user/users/:id`: staff edit of name and role.
pub async fn update_user(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<AdminUpdateUserRequest>,
) -> Result<ApiJson<UserResponse>, ApiError> {
    request.validate()?;

    let role = Role::from_str(&request.role)
        .map_err(|_| ApiError::BadRequest("invalid role".to_string()))?;
    if !auth.role.can_assign(role) {
        return Err(ApiError::BadRequest("invalid role to select".to_string()));
    }

    let users = UserRepository::new(state.pool);
    let target = load_user(&users, id).await?;
    if !auth.role.can_manage(target.role) {
        return Err(ApiError::Forbidden(NO_PERMISSION.to_string()));
    }

    let updated: User = users
        .update_profile(id, &request.full_name, role.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?
        .into();

    tracing::info!(
        actor_id = auth.user_id,
        user_id = updated.id,
        role = %updated.role,
        "User updated by staff"
    );

    Ok(ApiJson(updated.into()))
}

/// `DELETE /user/users/:id`: staff soft-delete.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let users = UserRepository::new(state.pool);
    let target = load_user(&users, id).await?;
    if !auth.role.can_manage(target.role) {
        return Err(ApiError::Forbidden(NO_PERMISSION.to_string()));
    }

    if !users.soft_delete(id).await? {
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    }

    tracing::info!(actor_id = auth.user_id, user_id = id, "User deleted by staff");
    Ok(StatusCode::NO_CONTENT)
}
