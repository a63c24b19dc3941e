//! Exame (exam attachment/result) model.
//!
//! Exames are immutable once created: there is no update path, and they
//! disappear only when their owning prontuário is deleted (cascade).

use serde::Serialize;

/// A stored exame, as returned by listings.
///
/// The result date is exposed under both `data_resultado` and
/// `data_anexo`: older consumers read the second name.
#[derive(Debug, Clone, Serialize)]
pub struct Exame {
    pub id: i64,
    pub prontuario_id: i64,
    pub tipo: Option<String>,
    pub observacoes: Option<String>,
    pub arquivo: Option<String>,
    pub resultado: Option<String>,
    pub data_resultado: Option<String>,
    pub data_anexo: Option<String>,
    pub created_at: String,
}

/// Fields for a new exame row. Exactly one of the two creation paths
/// fills `arquivo` (file upload) or `resultado` (textual result).
#[derive(Debug, Clone, Default)]
pub struct ExameInput {
    pub prontuario_id: i64,
    pub tipo: Option<String>,
    pub observacoes: Option<String>,
    pub arquivo: Option<String>,
    pub resultado: Option<String>,
    pub data_resultado: Option<String>,
}

/// Resolve the semantic result date from its two accepted wire names;
/// the first non-empty value wins.
pub fn resolve_data_resultado(
    data_resultado: Option<String>,
    data_anexo: Option<String>,
) -> Option<String> {
    data_resultado
        .filter(|d| !d.trim().is_empty())
        .or_else(|| data_anexo.filter(|d| !d.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_date_name_wins() {
        let d = resolve_data_resultado(Some("2024-01-02".into()), Some("2024-03-04".into()));
        assert_eq!(d.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn alternate_name_used_when_primary_blank() {
        let d = resolve_data_resultado(Some("  ".into()), Some("2024-03-04".into()));
        assert_eq!(d.as_deref(), Some("2024-03-04"));
    }

    #[test]
    fn both_absent_yields_none() {
        assert!(resolve_data_resultado(None, None).is_none());
    }
}
