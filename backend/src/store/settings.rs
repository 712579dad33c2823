use super::{ConfigurationStore, SqliteStore};
use crate::error::StoreError;
use common::model::settings::{FormSettings, SiteSettings};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

impl ConfigurationStore for SqliteStore {
    fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        let conn = self.conn.lock();
        let settings = conn
            .query_row(
                "SELECT remote_base_url, public_key, private_key, local_identifier, results_enabled
                 FROM site_settings WHERE id = 1",
                [],
                |row| {
                    Ok(SiteSettings {
                        remote_base_url: row.get(0)?,
                        public_key: row.get(1)?,
                        private_key: row.get(2)?,
                        local_identifier: row.get(3)?,
                        results_enabled: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    fn save_site_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO site_settings
                 (id, remote_base_url, public_key, private_key, local_identifier, results_enabled)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 remote_base_url = excluded.remote_base_url,
                 public_key = excluded.public_key,
                 private_key = excluded.private_key,
                 local_identifier = excluded.local_identifier,
                 results_enabled = excluded.results_enabled",
            params![
                settings.remote_base_url.trim(),
                settings.public_key.trim(),
                settings.private_key.trim(),
                settings.local_identifier.trim(),
                settings.results_enabled,
            ],
        )?;
        Ok(())
    }

    fn form_settings(&self, form_id: i64) -> Result<Option<FormSettings>, StoreError> {
        let conn = self.conn.lock();
        let settings = conn
            .query_row(
                "SELECT enabled, remote_form_id, delete_after_forward
                 FROM form_settings WHERE form_id = ?1",
                params![form_id],
                |row| {
                    Ok(FormSettings {
                        enabled: row.get(0)?,
                        remote_form_id: row.get(1)?,
                        delete_after_forward: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    fn save_form_settings(&self, form_id: i64, settings: &FormSettings) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO form_settings (form_id, enabled, remote_form_id, delete_after_forward)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(form_id) DO UPDATE SET
                 enabled = excluded.enabled,
                 remote_form_id = excluded.remote_form_id,
                 delete_after_forward = excluded.delete_after_forward",
            params![
                form_id,
                settings.enabled,
                settings.remote_form_id.trim(),
                settings.delete_after_forward,
            ],
        )?;
        Ok(())
    }

    fn claim_remote_form_id(&self, form_id: i64, candidate: &str) -> Result<String, StoreError> {
        let mut conn = self.conn.lock();
        // IMMEDIATE takes the write lock up front so no other process can
        // slip a write in between the read and the update.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: Option<String> = tx
            .query_row(
                "SELECT remote_form_id FROM form_settings WHERE form_id = ?1",
                params![form_id],
                |row| row.get(0),
            )
            .optional()?;

        let winner = match current {
            None => return Err(StoreError::MissingFormSettings(form_id)),
            Some(existing) if !existing.trim().is_empty() => existing,
            Some(_) => {
                tx.execute(
                    "UPDATE form_settings SET remote_form_id = ?1 WHERE form_id = ?2",
                    params![candidate, form_id],
                )?;
                candidate.to_string()
            }
        };

        tx.commit()?;
        Ok(winner)
    }
}
