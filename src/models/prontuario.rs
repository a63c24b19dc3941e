//! Prontuário (patient visit record) model and request payload validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored prontuário, as returned by listings.
#[derive(Debug, Clone, Serialize)]
pub struct Prontuario {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub data_consulta: String,
    pub diagnostico: String,
    pub sintomas: String,
    pub anamnese: String,
    pub exames_solicitados: Vec<String>,
}

/// Incoming create/update payload. All fields optional at the wire level;
/// [`NewProntuario::validate`] enforces the required ones.
#[derive(Debug, Default, Deserialize)]
pub struct NewProntuario {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub data_consulta: Option<String>,
    pub diagnostico: Option<String>,
    pub sintomas: Option<String>,
    pub anamnese: Option<String>,
    pub exames_solicitados: Option<Value>,
}

/// A validated prontuário payload, ready for storage.
#[derive(Debug, Clone)]
pub struct ProntuarioInput {
    pub nome: String,
    pub cpf: String,
    pub data_consulta: String,
    pub diagnostico: String,
    pub sintomas: String,
    pub anamnese: String,
    pub exames_solicitados: Vec<String>,
}

impl NewProntuario {
    /// Validate required fields and normalize the requested-exam list.
    ///
    /// nome, cpf, data_consulta and diagnostico must be present and
    /// non-blank; sintomas/anamnese default to empty strings.
    pub fn validate(self) -> Result<ProntuarioInput, String> {
        let nome = required(self.nome, "nome")?;
        let cpf = required(self.cpf, "cpf")?;
        let data_consulta = required(self.data_consulta, "data_consulta")?;
        let diagnostico = required(self.diagnostico, "diagnostico")?;

        Ok(ProntuarioInput {
            nome,
            cpf,
            data_consulta,
            diagnostico,
            sintomas: self.sintomas.unwrap_or_default(),
            anamnese: self.anamnese.unwrap_or_default(),
            exames_solicitados: normalize_exames_solicitados(self.exames_solicitados),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("Campo obrigatório ausente: {field}")),
    }
}

/// Normalize the requested-exam list to a list of strings.
///
/// Anything that is not a JSON array becomes an empty list; non-string
/// array elements are dropped.
pub fn normalize_exames_solicitados(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode the stored JSON-array-as-text column back to a list,
/// defaulting to empty on malformed content.
pub fn decode_exames_solicitados(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
