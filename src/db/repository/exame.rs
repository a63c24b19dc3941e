use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Exame, ExameInput};

/// Insert an exame row. `created_at` is assigned here, at insert time.
pub fn insert_exame(conn: &Connection, input: &ExameInput) -> Result<i64, DatabaseError> {
    let created_at = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO exames (prontuario_id, tipo, observacoes, arquivo, resultado, data_resultado, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.prontuario_id,
            input.tipo,
            input.observacoes,
            input.arquivo,
            input.resultado,
            input.data_resultado,
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All exames for a prontuário, most recent creation first.
pub fn list_exames(conn: &Connection, prontuario_id: i64) -> Result<Vec<Exame>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, prontuario_id, tipo, observacoes, arquivo, resultado, data_resultado, created_at
         FROM exames WHERE prontuario_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![prontuario_id], |row| {
        let data_resultado: Option<String> = row.get(6)?;
        Ok(Exame {
            id: row.get(0)?,
            prontuario_id: row.get(1)?,
            tipo: row.get(2)?,
            observacoes: row.get(3)?,
            arquivo: row.get(4)?,
            resultado: row.get(5)?,
            data_anexo: data_resultado.clone(),
            data_resultado,
            created_at: row.get(7)?,
        })
    })?;

    let mut exames = Vec::new();
    for row in rows {
        exames.push(row?);
    }
    Ok(exames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::prontuario::{delete_prontuario, insert_prontuario};
    use crate::models::ProntuarioInput;

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

    #[test]
    fn insert_and_list_roundtrip() {
        let conn = open_memory_database().unwrap();
        let pid = seed_prontuario(&conn);

        let id = insert_exame(
            &conn,
            &ExameInput {
                prontuario_id: pid,
                tipo: Some("hemograma".into()),
                resultado: Some("Hb 13,2".into()),
                data_resultado: Some("2024-03-02".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let exames = list_exames(&conn, pid).unwrap();
        assert_eq!(exames.len(), 1);
        assert_eq!(exames[0].id, id);
        assert_eq!(exames[0].tipo.as_deref(), Some("hemograma"));
        assert!(!exames[0].created_at.is_empty());
        // Date visible under both wire names
        assert_eq!(exames[0].data_resultado, exames[0].data_anexo);
    }

    #[test]
    fn listing_is_newest_created_first() {
        let conn = open_memory_database().unwrap();
        let pid = seed_prontuario(&conn);

        for tipo in ["primeiro", "segundo", "terceiro"] {
            insert_exame(
                &conn,
                &ExameInput {
                    prontuario_id: pid,
                    tipo: Some(tipo.into()),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let exames = list_exames(&conn, pid).unwrap();
        // Same-timestamp inserts fall back to id ordering
        assert_eq!(exames[0].tipo.as_deref(), Some("terceiro"));
        assert_eq!(exames[2].tipo.as_deref(), Some("primeiro"));
    }

    #[test]
    fn delete_prontuario_cascades_to_exames() {
        let conn = open_memory_database().unwrap();
        let pid = seed_prontuario(&conn);
        insert_exame(
            &conn,
            &ExameInput {
                prontuario_id: pid,
                resultado: Some("ok".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(delete_prontuario(&conn, pid).unwrap());
        assert!(list_exames(&conn, pid).unwrap().is_empty());
    }

    #[test]
    fn insert_with_unknown_prontuario_fails() {
        let conn = open_memory_database().unwrap();
        let result = insert_exame(
            &conn,
            &ExameInput {
                prontuario_id: 99,
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
