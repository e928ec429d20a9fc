//! City endpoints, nested under their state.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use domain::models::city::{CityRequest, CityResponse};
use domain::models::{City, ListResponse};
use persistence::repositories::{CityRepository, StateRepository};
use sqlx::PgPool;
use validator::Validate;

use super::states::{TitleListQuery, STATE_NOT_FOUND};
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath};

const CITY_NOT_FOUND: &str = "city not found";

async fn ensure_state_exists(pool: &PgPool, state_id: i64) -> Result<(), ApiError> {
    StateRepository::new(pool.clone())
        .find_by_id(state_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(STATE_NOT_FOUND.to_string()))
}

fn city_response(row: persistence::entities::CityEntity) -> CityResponse {
    City::from(row).into()
}

/// `GET /settings/states/:id/city`.
pub async fn list_cities(
    State(state): State<AppState>,
    ApiPath(state_id): ApiPath<i64>,
    Query(query): Query<TitleListQuery>,
) -> Result<ApiJson<ListResponse<CityResponse>>, ApiError> {
    ensure_state_exists(&state.pool, state_id).await?;

    let page = query.page_request();
    let title = query.title();
    let cities = CityRepository::new(state.pool);

    let total = cities.count(state_id, title.as_deref()).await?;
    let result = cities
        .list(state_id, title.as_deref(), page.limit(), page.offset())
        .await?
        .into_iter()
        .map(city_response)
        .collect();

    Ok(ApiJson(ListResponse::new(result, total, page)))
}

/// `GET /settings/states/:id/city/:city_id`.
pub async fn get_city(
    State(state): State<AppState>,
    ApiPath((state_id, city_id)): ApiPath<(i64, i64)>,
) -> Result<ApiJson<CityResponse>, ApiError> {
    ensure_state_exists(&state.pool, state_id).await?;

    let city = CityRepository::new(state.pool)
        .find_in_state(state_id, city_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(CITY_NOT_FOUND.to_string()))?;

    Ok(ApiJson(city_response(city)))
}

/// `POST /settings/states/:id/city`.
pub async fn create_city(
    State(state): State<AppState>,
    ApiPath(state_id): ApiPath<i64>,
    ApiJson(request): ApiJson<CityRequest>,
) -> Result<(StatusCode, ApiJson<CityResponse>), ApiError> {
    request.validate()?;
    ensure_state_exists(&state.pool, state_id).await?;

    let created = CityRepository::new(state.pool)
        .create(state_id, &request.title)
        .await?;

    tracing::info!(state_id, city_id = created.id, "City created");
    Ok((StatusCode::CREATED, ApiJson(city_response(created))))
}

/// `PUT /settings/states/:id/city/:city_id`.
pub async fn update_city(
    State(state): State<AppState>,
    ApiPath((state_id, city_id)): ApiPath<(i64, i64)>,
    ApiJson(request): ApiJson<CityRequest>,
) -> Result<ApiJson<CityResponse>, ApiError> {
    request.validate()?;
    ensure_state_exists(&state.pool, state_id).await?;

    let updated = CityRepository::new(state.pool)
        .update(state_id, city_id, &request.title)
        .await?
        .ok_or_else(|| ApiError::NotFound(CITY_NOT_FOUND.to_string()))?;

    Ok(ApiJson(city_response(updated)))
}

/// `DELETE /settings/states/:id/city/:city_id`.
pub async fn delete_city(
    State(state): State<AppState>,
    ApiPath((state_id, city_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    ensure_state_exists(&state.pool, state_id).await?;

    if !CityRepository::new(state.pool)
        .delete(state_id, city_id)
        .await?
    {
        return Err(ApiError::NotFound(CITY_NOT_FOUND.to_string()));
    }

    tracing::info!(state_id, city_id, "City deleted");
    Ok(StatusCode::NO_CONTENT)
}
