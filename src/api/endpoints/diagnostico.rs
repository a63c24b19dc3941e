//! AI triage endpoint: summarize exams, build the prompt, call the
//! oracle, and interpret whatever comes back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::triage::prompt::build_triage_prompt;
use crate::triage::summary::resumo_exames;
use crate::triage::interpret::interpret_response;

#[derive(Deserialize, Default)]
pub struct DiagnosticoRequest {
    pub sintomas: Option<String>,
    pub anamnese: Option<String>,
    pub prontuario_id: Option<i64>,
    pub resumo_exames: Option<String>,
}

/// `POST /ai-diagnostico`
///
/// Requires sintomas or anamnese (400 otherwise, without contacting the
/// oracle). An explicit `resumo_exames` wins over a `prontuario_id`
/// lookup. Oracle failures come back as a 502 with diagnostic detail,
/// never as an unhandled fault.
pub async fn sugerir(
    State(ctx): State<ApiContext>,
    Json(payload): Json<DiagnosticoRequest>,
) -> Result<Response, ApiError> {
    let sintomas = payload.sintomas.unwrap_or_default();
    let anamnese = payload.anamnese.unwrap_or_default();

    if sintomas.trim().is_empty() && anamnese.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Informe sintomas ou anamnese".into(),
        ));
    }

    let resumo = match payload.resumo_exames {
        Some(resumo) if !resumo.trim().is_empty() => resumo,
        _ => match payload.prontuario_id {
            Some(id) => {
                let conn = ctx.connection()?;
                resumo_exames(&conn, id)?
            }
            None => String::new(),
        },
    };

    let prompt = build_triage_prompt(&sintomas, &anamnese, &resumo);
    let model = ctx.llm.model().to_string();
    let host = ctx.llm.host().to_string();

    // Blocking round-trip, moved off the async worker threads. No
    // timeout or retry; a slow oracle stalls only this request.
    let llm = ctx.llm.clone();
    let outcome = tokio::task::spawn_blocking(move || llm.generate(&prompt))
        .await
        .map_err(|e| ApiError::Internal(format!("Falha na tarefa de inferência: {e}")))?;

    match outcome {
        Ok(raw) => {
            let sugestao = interpret_response(&raw);
            Ok(Json(json!({
                "sugestao": sugestao,
                "model": model,
                "host": host,
            }))
            .into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, %model, %host, "Falha na consulta ao serviço de IA");
            Ok((
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Falha ao consultar o serviço de IA",
                    "detail": err.to_string(),
                    "model": model,
                    "host": host,
                })),
            )
                .into_response())
        }
    }
}
