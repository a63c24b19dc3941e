//! Renders the stored exames of one prontuário into a flat text block
//! for the triage prompt.

use rusqlite::Connection;

use crate::db::repository::exame::list_exames;
use crate::db::DatabaseError;
use crate::models::Exame;

/// One line per exame, most recent first; empty string when there is
/// nothing to say.
pub fn resumo_exames(conn: &Connection, prontuario_id: i64) -> Result<String, DatabaseError> {
    let exames = list_exames(conn, prontuario_id)?;
    let linhas: Vec<String> = exames
        .iter()
        .map(render_linha)
        .filter(|l| !l.is_empty())
        .collect();
    Ok(linhas.join("\n"))
}

/// Render a single exame as a pipe-separated line, omitting absent
/// attributes. When only a file reference exists, append a note that the
/// file itself must be interpreted.
pub fn render_linha(exame: &Exame) -> String {
    let mut partes: Vec<String> = Vec::new();

    if let Some(tipo) = present(&exame.tipo) {
        partes.push(format!("Tipo: {tipo}"));
    }
    if let Some(data) = present(&exame.data_resultado) {
        partes.push(format!("Data: {data}"));
    }
    if let Some(resultado) = present(&exame.resultado) {
        partes.push(format!("Resultado: {resultado}"));
    }
    if let Some(obs) = present(&exame.observacoes) {
        partes.push(format!("Observações: {obs}"));
    }
    if let Some(arquivo) = present(&exame.arquivo) {
        partes.push(format!("Arquivo: {arquivo}"));
    }

    let sem_resultado = present(&exame.resultado).is_none();
    if present(&exame.arquivo).is_some() && sem_resultado {
        partes.push(
            "Sem resultado textual: o arquivo anexado deve ser interpretado".to_string(),
        );
    }

    partes.join(" | ")
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::exame::insert_exame;
    use crate::db::repository::prontuario::insert_prontuario;
    use crate::models::{ExameInput, ProntuarioInput};

    fn seed_prontuario(conn: &Connection) -> i64 {
        let input = ProntuarioInput {
            nome: "Maria".into(),
            cpf: "123".into(),
            data_consulta: "2024-03-01".into(),
            diagnostico: "virose".into(),
            sintomas: String::new(),
            anamnese: String::new(),
            exames_solicitados: vec![],
        };
        insert_prontuario(conn, &input).unwrap()
    }

    fn exame(tipo: &str) -> Exame {
        Exame {
            id: 1,
            prontuario_id: 1,
            tipo: Some(tipo.into()),
            observacoes: None,
            arquivo: None,
            resultado: None,
            data_resultado: None,
            data_anexo: None,
            created_at: "2024-03-02T10:00:00Z".into(),
        }
    }

    #[test]
    fn zero_exames_yields_empty_document() {
        let conn = open_memory_database().unwrap();
        let pid = seed_prontuario(&conn);
        assert_eq!(resumo_exames(&conn, pid).unwrap(), "");
    }

    #[test]
    fn line_concatenates_present_attributes_in_order() {
        let mut e = exame("hemograma");
        e.data_resultado = Some("2024-03-02".into());
        e.resultado = Some("Hb 13,2".into());
        e.observacoes = Some("jejum".into());
        let linha = render_linha(&e);
        assert_eq!(
            linha,
            "Tipo: hemograma | Data: 2024-03-02 | Resultado: Hb 13,2 | Observações: jejum"
        );
    }

    #[test]
    fn file_without_result_gets_interpret_note() {
        let mut e = exame("raio-x");
        e.arquivo = Some("1700_raiox.png".into());
        let linha = render_linha(&e);
        assert!(linha.contains("deve ser interpretado"));
    }

    #[test]
    fn file_with_result_has_no_interpret_note() {
        let mut e = exame("raio-x");
        e.arquivo = Some("1700_raiox.png".into());
        e.resultado = Some("sem alterações".into());
        let linha = render_linha(&e);
        assert!(!linha.contains("deve ser interpretado"));
    }

    #[test]
    fn exame_with_no_attributes_renders_empty() {
        let mut e = exame("x");
        e.tipo = None;
        assert_eq!(render_linha(&e), "");
    }

    #[test]
    fn summary_joins_lines_most_recent_first() {
        let conn = open_memory_database().unwrap();
        let pid = seed_prontuario(&conn);
        for tipo in ["hemograma", "tsh"] {
            insert_exame(
                &conn,
                &ExameInput {
                    prontuario_id: pid,
                    tipo: Some(tipo.into()),
                    resultado: Some("ok".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let resumo = resumo_exames(&conn, pid).unwrap();
        let linhas: Vec<&str> = resumo.lines().collect();
        assert_eq!(linhas.len(), 2);
        assert!(linhas[0].contains("tsh"));
        assert!(linhas[1].contains("hemograma"));
    }
}
