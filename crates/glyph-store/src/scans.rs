//! Scan ledger operations.
//!
//! The ledger is the pre-decryption gate in front of the codec: it decides
//! whether a freshly scanned payload should be withheld (read-once already
//! viewed) and records every physical scan event.  A QR code can be scanned
//! any number of times and the transport cannot delete anything, so this
//! client-side ledger is the only thing standing behind "view once".
//!
//! Call order matters: consult [`Database::should_block`] (or
//! [`Database::should_block_rescan`]) first, then [`Database::record_scan`]
//! exactly once per physical scan, so the first scan of a read-once payload
//! is never blocked by its own recording.

use chrono::{DateTime, Utc};
use rusqlite::params;

use glyph_shared::crypto::hash_payload;
use glyph_shared::Expiration;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{BlockReason, ScanRecord};

impl Database {
    // ------------------------------------------------------------------
    // Policy decisions (no mutation)
    // ------------------------------------------------------------------

    /// Decide whether a scan of `payload` must be withheld, given the
    /// expiration mode of the decoded message.
    ///
    /// Forever and timed modes are never blocked here; the absolute
    /// delivery window of a timed message lives on the record itself
    /// (`Message::is_window_expired`), orthogonal to this ledger.
    pub fn should_block(
        &self,
        payload: &str,
        expiration: Expiration,
    ) -> Result<Option<BlockReason>> {
        match expiration {
            Expiration::Forever | Expiration::Timed(_) => Ok(None),
            Expiration::ReadOnce => {
                if self.scan_count(payload)? > 0 {
                    Ok(Some(BlockReason::ReadOnceAlreadyViewed))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Decide from the ledger alone, without decoding anything.
    ///
    /// Uses the expiration mode captured at first scan, so a read-once
    /// PIN-protected payload is blockable on re-scan before a PIN prompt
    /// ever appears.  Payloads never recorded are never blocked.
    pub fn should_block_rescan(&self, payload: &str) -> Result<Option<BlockReason>> {
        match self.get_scan(payload)? {
            Some(record) if record.expiration == Expiration::ReadOnce => {
                Ok(Some(BlockReason::ReadOnceAlreadyViewed))
            }
            _ => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Record one physical scan event and return the updated entry.
    ///
    /// First call creates the entry with count 1 and captures the
    /// expiration mode; every later call increments the count and
    /// refreshes `last_seen`.  The write is committed before this
    /// function returns.
    pub fn record_scan(&self, payload: &str, expiration: Expiration) -> Result<ScanRecord> {
        let hash = hash_payload(payload);
        let now = Utc::now().to_rfc3339();

        self.conn().execute(
            "INSERT INTO scans (payload_hash, expiration_seconds, first_seen, last_seen, scan_count)
             VALUES (?1, ?2, ?3, ?3, 1)
             ON CONFLICT(payload_hash) DO UPDATE SET
                 scan_count = scan_count + 1,
                 last_seen  = excluded.last_seen",
            params![hash, expiration.as_seconds(), now],
        )?;

        let record = self.get_scan(payload)?.ok_or(StoreError::NotFound)?;

        tracing::debug!(
            payload_hash = %record.payload_hash,
            scan_count = record.scan_count,
            "scan recorded"
        );

        Ok(record)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether this payload has ever been recorded on this device.
    pub fn has_been_scanned(&self, payload: &str) -> Result<bool> {
        Ok(self.scan_count(payload)? > 0)
    }

    /// How many times this payload has been recorded (0 for never-seen).
    pub fn scan_count(&self, payload: &str) -> Result<u32> {
        let hash = hash_payload(payload);

        match self.conn().query_row(
            "SELECT scan_count FROM scans WHERE payload_hash = ?1",
            params![hash],
            |row| row.get::<_, u32>(0),
        ) {
            Ok(count) => Ok(count),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }

    /// Fetch the full ledger entry for a payload, if one exists.
    pub fn get_scan(&self, payload: &str) -> Result<Option<ScanRecord>> {
        let hash = hash_payload(payload);

        match self.conn().query_row(
            "SELECT payload_hash, expiration_seconds, first_seen, last_seen, scan_count
             FROM scans
             WHERE payload_hash = ?1",
            params![hash],
            row_to_scan,
        ) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`ScanRecord`].
fn row_to_scan(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScanRecord> {
    let payload_hash: String = row.get(0)?;
    let expiration_seconds: i64 = row.get(1)?;
    let first_str: String = row.get(2)?;
    let last_str: String = row.get(3)?;
    let scan_count: u32 = row.get(4)?;

    let first_seen: DateTime<Utc> = DateTime::parse_from_rfc3339(&first_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let last_seen: DateTime<Utc> = DateTime::parse_from_rfc3339(&last_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(ScanRecord {
        payload_hash,
        expiration: Expiration::from_seconds(expiration_seconds),
        first_seen,
        last_seen,
        scan_count,
    })
}

#[cfg(test)]
mod tests {
    use glyph_shared::Message;

    use super::*;

    fn open_test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("ledger.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn test_fresh_payload_is_unseen() {
        let (_dir, db) = open_test_db();

        assert!(!db.has_been_scanned("GLY1E:fresh").unwrap());
        assert_eq!(db.scan_count("GLY1E:fresh").unwrap(), 0);
        assert!(db.get_scan("GLY1E:fresh").unwrap().is_none());
        assert!(db.should_block_rescan("GLY1E:fresh").unwrap().is_none());
    }

    #[test]
    fn test_read_once_blocks_after_first_scan() {
        let (_dir, db) = open_test_db();
        let payload = "GLY1E:readonce";

        // first scan: allowed, then recorded
        assert!(db.should_block(payload, Expiration::ReadOnce).unwrap().is_none());
        db.record_scan(payload, Expiration::ReadOnce).unwrap();

        // second scan: blocked, and the reason names Read Once
        let reason = db
            .should_block(payload, Expiration::ReadOnce)
            .unwrap()
            .expect("second scan must be blocked");
        assert!(reason.to_string().contains("Read Once"));
    }

    #[test]
    fn test_forever_is_never_blocked() {
        let (_dir, db) = open_test_db();
        let payload = "GLY1E:forever";

        for _ in 0..5 {
            db.record_scan(payload, Expiration::Forever).unwrap();
        }

        assert!(db.should_block(payload, Expiration::Forever).unwrap().is_none());
        assert!(db.should_block_rescan(payload).unwrap().is_none());
        assert_eq!(db.scan_count(payload).unwrap(), 5);
    }

    #[test]
    fn test_timed_mode_is_not_the_ledgers_business() {
        let (_dir, db) = open_test_db();
        let payload = "GLY1E:timed";

        db.record_scan(payload, Expiration::Timed(30)).unwrap();
        db.record_scan(payload, Expiration::Timed(30)).unwrap();

        // window expiry is judged on the record, not here
        assert!(db.should_block(payload, Expiration::Timed(30)).unwrap().is_none());
        assert!(db.should_block_rescan(payload).unwrap().is_none());
    }

    #[test]
    fn test_scan_count_increments_by_one() {
        let (_dir, db) = open_test_db();
        let payload = "GLY1P:counted";

        for expected in 1..=3 {
            let record = db.record_scan(payload, Expiration::ReadOnce).unwrap();
            assert_eq!(record.scan_count, expected);
            assert_eq!(db.scan_count(payload).unwrap(), expected);
        }
    }

    #[test]
    fn test_record_scan_keeps_first_seen_and_mode() {
        let (_dir, db) = open_test_db();
        let payload = "GLY1P:repeat";

        let first = db.record_scan(payload, Expiration::ReadOnce).unwrap();
        let second = db.record_scan(payload, Expiration::ReadOnce).unwrap();

        assert_eq!(first.first_seen, second.first_seen);
        assert!(second.last_seen >= second.first_seen);
        assert_eq!(second.expiration, Expiration::ReadOnce);
    }

    #[test]
    fn test_ledger_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let payload = "GLY1E:durable";

        {
            let db = Database::open_at(&path).unwrap();
            db.record_scan(payload, Expiration::ReadOnce).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.scan_count(payload).unwrap(), 1);
        assert!(db
            .should_block(payload, Expiration::ReadOnce)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_rescan_gate_blocks_without_decoding() {
        let (_dir, db) = open_test_db();

        // a read-once message the receiver opened once, PIN and all
        let msg = Message::new("burn after reading", Expiration::ReadOnce);
        let payload = msg.encode_with_pin("9999").unwrap();

        let opened = Message::decode_with_pin(&payload, "9999").unwrap();
        assert!(db.should_block(&payload, opened.expiration).unwrap().is_none());
        db.record_scan(&payload, opened.expiration).unwrap();

        // re-scan: blocked from the ledger alone, before any PIN prompt
        let reason = db
            .should_block_rescan(&payload)
            .unwrap()
            .expect("recorded read-once payload must be blocked");
        assert!(reason.to_string().contains("Read Once"));

        // and indeed the payload is undecodable without the PIN
        assert!(Message::decode(&payload).is_none());
    }

    #[test]
    fn test_read_once_scenario_end_to_end() {
        let (_dir, db) = open_test_db();

        let msg = Message::new("see you at the station", Expiration::ReadOnce);
        let payload = msg.encode().unwrap();
        assert!(payload.starts_with("GLY1E:"));

        // receiver decodes, checks policy, records
        let received = Message::decode(&payload).expect("embedded tier decodes without PIN");
        assert_eq!(received.text.as_deref(), Some("see you at the station"));
        assert!(db.should_block(&payload, received.expiration).unwrap().is_none());
        db.record_scan(&payload, received.expiration).unwrap();

        // the same QR scanned again is withheld
        assert!(db
            .should_block(&payload, received.expiration)
            .unwrap()
            .is_some());
        assert!(db.has_been_scanned(&payload).unwrap());
    }
}
