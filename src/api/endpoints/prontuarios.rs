//! Prontuário CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::prontuario as repo;
use crate::models::{NewProntuario, Prontuario};

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// `POST /prontuario`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewProntuario>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let input = payload.validate().map_err(ApiError::BadRequest)?;
    let conn = ctx.connection()?;
    let id = repo::insert_prontuario(&conn, &input)?;
    tracing::info!(id, "Prontuário criado");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /prontuarios`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Prontuario>>, ApiError> {
    let conn = ctx.connection()?;
    Ok(Json(repo::list_prontuarios(&conn)?))
}

/// `PUT /prontuario/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(payload): Json<NewProntuario>,
) -> Result<Json<OkResponse>, ApiError> {
    let input = payload.validate().map_err(ApiError::BadRequest)?;
    let conn = ctx.connection()?;
    if !repo::update_prontuario(&conn, id, &input)? {
        return Err(ApiError::NotFound("Prontuário não encontrado".into()));
    }
    tracing::info!(id, "Prontuário atualizado");
    Ok(Json(OkResponse { ok: true }))
}

/// `DELETE /prontuario/:id`: cascade removes the owned exames.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, ApiError> {
    let conn = ctx.connection()?;
    if !repo::delete_prontuario(&conn, id)? {
        return Err(ApiError::NotFound("Prontuário não encontrado".into()));
    }
    tracing::info!(id, "Prontuário removido");
    Ok(Json(OkResponse { ok: true }))
}
