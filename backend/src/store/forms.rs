use super::SqliteStore;
use crate::error::StoreError;
use common::model::form::Form;
use rusqlite::{params, OptionalExtension};

impl SqliteStore {
    /// Saves a new form definition and returns it with its assigned id.
    pub fn insert_form(&self, form: &Form) -> Result<Form, StoreError> {
        let mut stored = form.clone();
        stored.id = None;
        let body = serde_json::to_string(&stored)
            .map_err(|source| StoreError::Encode { what: "form", source })?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO forms (title, body) VALUES (?1, ?2)",
            params![&stored.title, body],
        )?;
        stored.id = Some(conn.last_insert_rowid());
        Ok(stored)
    }

    pub fn form(&self, form_id: i64) -> Result<Option<Form>, StoreError> {
        let conn = self.conn.lock();
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM forms WHERE id = ?1",
                params![form_id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|body| decode_form(form_id, &body)).transpose()
    }

    pub fn forms(&self) -> Result<Vec<Form>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, body FROM forms ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.iter().map(|(id, body)| decode_form(*id, body)).collect()
    }
}

fn decode_form(form_id: i64, body: &str) -> Result<Form, StoreError> {
    let mut form: Form =
        serde_json::from_str(body).map_err(|source| StoreError::Corrupt { what: "form", source })?;
    form.id = Some(form_id);
    Ok(form)
}
