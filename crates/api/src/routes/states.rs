//! State reference data endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use domain::models::state::{StateRequest, StateResponse};
use domain::models::ListResponse;
use persistence::repositories::StateRepository;
use serde::Deserialize;
use shared::pagination::PageRequest;
use validator::Validate;

use super::non_empty;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath};

pub(crate) const STATE_NOT_FOUND: &str = "state not found";

/// Query parameters shared by the state and city lists.
#[derive(Debug, Default, Deserialize)]
pub struct TitleListQuery {
    pub page: Option<String>,
    #[serde(rename = "page-size")]
    pub page_size: Option<String>,
    pub title: Option<String>,
}

impl TitleListQuery {
    pub(crate) fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.page_size.as_deref())
    }

    pub(crate) fn title(self) -> Option<String> {
        non_empty(self.title)
    }
}

/// `GET /settings/states`.
pub async fn list_states(
    State(state): State<AppState>,
    Query(query): Query<TitleListQuery>,
) -> Result<ApiJson<ListResponse<StateResponse>>, ApiError> {
    let page = query.page_request();
    let title = query.title();
    let states = StateRepository::new(state.pool);

    let total = states.count(title.as_deref()).await?;
    let result = states
        .list(title.as_deref(), page.limit(), page.offset())
        .await?
        .into_iter()
        .map(|row| StateResponse::from(domain::models::State::from(row)))
        .collect();

    Ok(ApiJson(ListResponse::new(result, total, page)))
}

/// `GET /settings/states/:id`.
pub async fn get_state(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiJson<StateResponse>, ApiError> {
    let found = StateRepository::new(state.pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(STATE_NOT_FOUND.to_string()))?;

    Ok(ApiJson(domain::models::State::from(found).into()))
}

/// `POST /settings/states`.
pub async fn create_state(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StateRequest>,
) -> Result<(StatusCode, ApiJson<StateResponse>), ApiError> {
    request.validate()?;

    let created = StateRepository::new(state.pool)
        .create(&request.title)
        .await?;

    tracing::info!(state_id = created.id, "State created");
    Ok((
        StatusCode::CREATED,
        ApiJson(domain::models::State::from(created).into()),
    ))
}

/// `PUT /settings/states/:id`.
pub async fn update_state(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<StateRequest>,
) -> Result<ApiJson<StateResponse>, ApiError> {
    request.validate()?;

    let updated = StateRepository::new(state.pool)
        .update(id, &request.title)
        .await?
        .ok_or_else(|| ApiError::NotFound(STATE_NOT_FOUND.to_string()))?;

    Ok(ApiJson(domain::models::State::from(updated).into()))
}

/// `DELETE /settings/states/:id`. Cities of the state go with it.
pub async fn delete_state(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    if !StateRepository::new(state.pool).delete(id).await? {
        return Err(ApiError::NotFound(STATE_NOT_FOUND.to_string()));
    }

    tracing::info!(state_id = id, "State deleted");
    Ok(StatusCode::NO_CONTENT)
}
