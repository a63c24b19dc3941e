use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{decode_exames_solicitados, Prontuario, ProntuarioInput};

pub fn insert_prontuario(
    conn: &Connection,
    input: &ProntuarioInput,
) -> Result<i64, DatabaseError> {
    let exames = serde_json::to_string(&input.exames_solicitados)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    conn.execute(
        "INSERT INTO prontuarios (nome, cpf, data_consulta, diagnostico, sintomas, anamnese, exames_solicitados)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.nome,
            input.cpf,
            input.data_consulta,
            input.diagnostico,
            input.sintomas,
            input.anamnese,
            exames,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All prontuários, newest first, with the requested-exam list decoded.
pub fn list_prontuarios(conn: &Connection) -> Result<Vec<Prontuario>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, nome, cpf, data_consulta, diagnostico, sintomas, anamnese, exames_solicitados
         FROM prontuarios ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let raw_exames: String = row.get(7)?;
        Ok(Prontuario {
            id: row.get(0)?,
            nome: row.get(1)?,
            cpf: row.get(2)?,
            data_consulta: row.get(3)?,
            diagnostico: row.get(4)?,
            sintomas: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            anamnese: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            exames_solicitados: decode_exames_solicitados(&raw_exames),
        })
    })?;

    let mut prontuarios = Vec::new();
    for row in rows {
        prontuarios.push(row?);
    }
    Ok(prontuarios)
}

/// Full-field in-place update. Returns false when the id does not exist.
pub fn update_prontuario(
    conn: &Connection,
    id: i64,
    input: &ProntuarioInput,
) -> Result<bool, DatabaseError> {
    let exames = serde_json::to_string(&input.exames_solicitados)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    let changed = conn.execute(
        "UPDATE prontuarios
         SET nome = ?1, cpf = ?2, data_consulta = ?3, diagnostico = ?4,
             sintomas = ?5, anamnese = ?6, exames_solicitados = ?7
         WHERE id = ?8",
        params![
            input.nome,
            input.cpf,
            input.data_consulta,
            input.diagnostico,
            input.sintomas,
            input.anamnese,
            exames,
            id,
        ],
    )?;
    Ok(changed > 0)
}

/// Delete a prontuário. Owned exames go with it via the cascade on the
/// foreign key, not as an explicit application step.
pub fn delete_prontuario(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let changed = conn.execute("DELETE FROM prontuarios WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

pub fn prontuario_exists(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM prontuarios WHERE id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
