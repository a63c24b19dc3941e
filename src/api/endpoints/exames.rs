//! Exame ingest and listing endpoints.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::exame as repo;
use crate::db::repository::prontuario::prontuario_exists;
use crate::files::store_attachment;
use crate::models::{resolve_data_resultado, Exame, ExameInput};

#[derive(Serialize)]
pub struct ExameCreatedResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arquivo: Option<String>,
}

/// `POST /exames/upload`: multipart file-attachment path.
///
/// Fields: `prontuario_id` (required), `file`/`arquivo` (required, the
/// binary), optional `tipo`, `observacoes`, and the result date under
/// `data_resultado` or `data_anexo`.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ExameCreatedResponse>), ApiError> {
    let mut prontuario_id: Option<i64> = None;
    let mut tipo: Option<String> = None;
    let mut observacoes: Option<String> = None;
    let mut data_resultado: Option<String> = None;
    let mut data_anexo: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "prontuario_id" => {
                let text = field.text().await.unwrap_or_default();
                prontuario_id = text.trim().parse().ok();
            }
            "tipo" => tipo = non_empty(field.text().await.unwrap_or_default()),
            "observacoes" => observacoes = non_empty(field.text().await.unwrap_or_default()),
            "data_resultado" => {
                data_resultado = non_empty(field.text().await.unwrap_or_default())
            }
            "data_anexo" => data_anexo = non_empty(field.text().await.unwrap_or_default()),
            "file" | "arquivo" => {
                let filename = field.file_name().unwrap_or("documento").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Falha ao ler o arquivo: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let prontuario_id = prontuario_id
        .ok_or_else(|| ApiError::BadRequest("Campo obrigatório ausente: prontuario_id".into()))?;
    let (filename, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Nenhum arquivo enviado".into()))?;

    let conn = ctx.connection()?;
    if !prontuario_exists(&conn, prontuario_id)? {
        return Err(ApiError::NotFound("Prontuário não encontrado".into()));
    }

    let stored_name = store_attachment(&ctx.config.uploads_dir, &filename, &bytes)
        .map_err(|e| ApiError::Internal(format!("Falha ao gravar o arquivo: {e}")))?;

    let input = ExameInput {
        prontuario_id,
        tipo,
        observacoes,
        arquivo: Some(stored_name.clone()),
        resultado: None,
        data_resultado: resolve_data_resultado(data_resultado, data_anexo),
    };
    let id = repo::insert_exame(&conn, &input)?;

    tracing::info!(id, prontuario_id, arquivo = %stored_name, "Exame anexado");
    Ok((
        StatusCode::CREATED,
        Json(ExameCreatedResponse {
            id,
            arquivo: Some(stored_name),
        }),
    ))
}

#[derive(Deserialize)]
pub struct NovoExameTexto {
    pub prontuario_id: Option<i64>,
    pub resultado: Option<String>,
    pub tipo: Option<String>,
    pub observacoes: Option<String>,
    pub data_resultado: Option<String>,
    pub data_anexo: Option<String>,
}

/// `POST /exames/texto`: textual-result path.
pub async fn texto(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NovoExameTexto>,
) -> Result<(StatusCode, Json<ExameCreatedResponse>), ApiError> {
    let prontuario_id = payload
        .prontuario_id
        .ok_or_else(|| ApiError::BadRequest("Campo obrigatório ausente: prontuario_id".into()))?;

    let resultado = payload
        .resultado
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Resultado textual vazio".into()))?;

    let conn = ctx.connection()?;
    if !prontuario_exists(&conn, prontuario_id)? {
        return Err(ApiError::NotFound("Prontuário não encontrado".into()));
    }

    let input = ExameInput {
        prontuario_id,
        tipo: payload.tipo.and_then(non_empty),
        observacoes: payload.observacoes.and_then(non_empty),
        arquivo: None,
        resultado: Some(resultado),
        data_resultado: resolve_data_resultado(payload.data_resultado, payload.data_anexo),
    };
    let id = repo::insert_exame(&conn, &input)?;

    tracing::info!(id, prontuario_id, "Exame textual registrado");
    Ok((
        StatusCode::CREATED,
        Json(ExameCreatedResponse { id, arquivo: None }),
    ))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub prontuario_id: Option<i64>,
}

/// `GET /exames?prontuario_id=`: most recent creation first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Exame>>, ApiError> {
    let prontuario_id = query
        .prontuario_id
        .ok_or_else(|| ApiError::BadRequest("Parâmetro obrigatório ausente: prontuario_id".into()))?;
    let conn = ctx.connection()?;
    Ok(Json(repo::list_exames(&conn, prontuario_id)?))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
