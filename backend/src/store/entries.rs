use super::SqliteStore;
use crate::error::StoreError;
use chrono::Utc;
use common::model::entry::Entry;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type EntryRow = (i64, i64, String, Option<String>, String);

impl SqliteStore {
    /// Stores a submission for a local form and returns the saved entry.
    pub fn insert_entry(
        &self,
        form_id: i64,
        origin: Option<&str>,
        values: &BTreeMap<String, Value>,
    ) -> Result<Entry, StoreError> {
        let date_created = Utc::now().format(DATE_FORMAT).to_string();
        let body = serde_json::to_string(values)
            .map_err(|source| StoreError::Encode { what: "entry", source })?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO entries (form_id, date_created, origin, body) VALUES (?1, ?2, ?3, ?4)",
            params![form_id, &date_created, origin, body],
        )?;

        Ok(Entry {
            id: conn.last_insert_rowid(),
            form_id: form_id.to_string(),
            date_created,
            origin: origin.map(str::to_string),
            values: values.clone(),
        })
    }

    pub fn entry(&self, entry_id: i64) -> Result<Option<Entry>, StoreError> {
        let conn = self.conn.lock();
        let row: Option<EntryRow> = conn
            .query_row(
                "SELECT id, form_id, date_created, origin, body FROM entries WHERE id = ?1",
                params![entry_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;
        row.map(decode_entry).transpose()
    }

    pub fn entries(&self, form_id: i64) -> Result<Vec<Entry>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, form_id, date_created, origin, body FROM entries
             WHERE form_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![form_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<Result<Vec<EntryRow>, _>>()?;
        rows.into_iter().map(decode_entry).collect()
    }

    /// Returns `false` when there was no entry with that id.
    pub fn delete_entry(&self, entry_id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", params![entry_id])?;
        Ok(deleted > 0)
    }
}

fn decode_entry((id, form_id, date_created, origin, body): EntryRow) -> Result<Entry, StoreError> {
    let values = serde_json::from_str(&body)
        .map_err(|source| StoreError::Corrupt { what: "entry", source })?;
    Ok(Entry {
        id,
        form_id: form_id.to_string(),
        date_created,
        origin,
        values,
    })
}
