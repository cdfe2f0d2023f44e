use super::DbConn;
use crate::domain::{CardId, ChartRecord};
use anyhow::Result;
use rusqlite::OptionalExtension;

/// Repository for chart operations.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    conn: DbConn,
}

impl ChartRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Insert the record, replacing any previous record for the same card.
    pub fn save(&self, record: &ChartRecord) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO chart_data (card_id, content, stored_at) VALUES (?1, ?2, ?3)",
            (&record.card_id, &record.content, record.stored_at),
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn find(&self, card_id: &CardId) -> Result<Option<ChartRecord>> {
        let conn = self.conn.lock();
        let record = conn
            .query_row(
                "SELECT card_id, content, stored_at FROM chart_data WHERE card_id = ?1",
                [card_id],
                |row| {
                    Ok(ChartRecord {
                        card_id: row.get(0)?,
                        content: row.get(1)?,
                        stored_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Payload only, without decoding the rest of the row.
    pub fn find_content(&self, card_id: &CardId) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let content = conn
            .query_row(
                "SELECT content FROM chart_data WHERE card_id = ?1",
                [card_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(content)
    }

    /// Returns the number of removed rows (0 or 1).
    pub fn delete(&self, card_id: &CardId) -> Result<usize> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let affected = tx.execute("DELETE FROM chart_data WHERE card_id = ?1", [card_id])?;
        tx.commit()?;
        Ok(affected)
    }

    pub fn clear(&self) -> Result<usize> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let affected = tx.execute("DELETE FROM chart_data", [])?;
        tx.commit()?;
        Ok(affected)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM chart_data", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
