//! Latest-status aggregation over the readings table.
//!
//! # Responsibilities
//! - Fetch the newest reading per bay in a single bounded query
//! - Map raw values through the codec, failing closed on unknown data
//! - Report the newest timestamp across all returned readings
//!
//! # Design Decisions
//! - One winner per bay via `DISTINCT ON` + `ORDER BY time DESC`
//! - A single out-of-domain row aborts the whole call; no partial lists
//! - No retries: a failed or timed-out query surfaces once

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tokio::time::timeout;

use crate::status::codec::{self, CodecError};

/// Upper bound on the latest-status query.
const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

const LATEST_SQL: &str = "\
    SELECT DISTINCT ON (bay_id) time, bay_id, status_code \
    FROM bay_status \
    ORDER BY bay_id, time DESC";

/// Errors from the aggregation path.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("status query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("status query timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// One raw sensor sample as stored in the readings table.
#[derive(Debug, sqlx::FromRow)]
struct ReadingRow {
    time: DateTime<Utc>,
    bay_id: String,
    status_code: i32,
}

/// Display-ready status for one bay. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BayStatus {
    pub bay_id: &'static str,
    pub status: &'static str,
}

/// Read-only access to the latest bay readings.
#[derive(Clone)]
pub struct BayRepo {
    pool: PgPool,
}

impl BayRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Latest status for every bay plus the newest reading time.
    ///
    /// Returns an empty list and `None` when the readings table is empty.
    pub async fn latest(&self) -> Result<(Vec<BayStatus>, Option<DateTime<Utc>>), StatusError> {
        let fetch = sqlx::query_as::<_, ReadingRow>(LATEST_SQL).fetch_all(&self.pool);

        let rows = timeout(QUERY_TIMEOUT, fetch)
            .await
            .map_err(|_| StatusError::Timeout(QUERY_TIMEOUT))??;

        assemble(rows)
    }
}

/// Fold raw rows into display statuses and the newest timestamp.
///
/// The first unmapped value aborts the fold; already-mapped rows are
/// discarded rather than returned partially.
fn assemble(rows: Vec<ReadingRow>) -> Result<(Vec<BayStatus>, Option<DateTime<Utc>>), StatusError> {
    let mut bays = Vec::with_capacity(rows.len());
    let mut last_update: Option<DateTime<Utc>> = None;

    for row in rows {
        let bay_id = codec::display_bay(&row.bay_id)?;
        let status = codec::display_status(row.status_code)?;

        if last_update.is_none_or(|t| row.time > t) {
            last_update = Some(row.time);
        }

        bays.push(BayStatus { bay_id, status });
    }

    Ok((bays, last_update))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(h: u32, m: u32, bay_id: &str, status_code: i32) -> ReadingRow {
        ReadingRow {
            time: Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap(),
            bay_id: bay_id.to_string(),
            status_code,
        }
    }

    #[test]
    fn test_assemble_maps_rows_and_tracks_newest_time() {
        let rows = vec![row(9, 0, "washbay1", 1), row(9, 30, "washbay2", 0)];

        let (bays, last) = assemble(rows).unwrap();

        assert_eq!(
            bays,
            vec![
                BayStatus { bay_id: "Washbay 1", status: "Occupied" },
                BayStatus { bay_id: "Washbay 2", status: "Empty" },
            ]
        );
        assert_eq!(last, Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()));
    }

    #[test]
    fn test_assemble_empty_input() {
        let (bays, last) = assemble(Vec::new()).unwrap();
        assert!(bays.is_empty());
        assert_eq!(last, None);
    }

    #[test]
    fn test_assemble_one_entry_per_bay() {
        let rows = vec![
            row(9, 0, "washbay1", 1),
            row(9, 5, "washbay2", 2),
            row(9, 10, "washbay3", 0),
            row(9, 15, "washbay4", 0),
            row(9, 20, "washbay5", 1),
            row(9, 25, "washbay6", 2),
        ];

        let (bays, last) = assemble(rows).unwrap();

        assert_eq!(bays.len(), 6);
        let mut ids: Vec<_> = bays.iter().map(|b| b.bay_id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert_eq!(last, Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 25, 0).unwrap()));
    }

    #[test]
    fn test_assemble_newest_time_is_order_independent() {
        let rows = vec![row(9, 30, "washbay2", 0), row(9, 0, "washbay1", 1)];

        let (_, last) = assemble(rows).unwrap();
        assert_eq!(last, Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()));
    }

    #[test]
    fn test_assemble_fails_closed_on_unknown_status_code() {
        let rows = vec![
            row(9, 0, "washbay1", 1),
            row(9, 5, "washbay2", 99),
            row(9, 10, "washbay3", 0),
        ];

        let err = assemble(rows).unwrap_err();
        match err {
            StatusError::Codec(CodecError::UnknownStatusCode(99)) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_assemble_fails_closed_on_unknown_bay() {
        let rows = vec![row(9, 0, "washbay1", 1), row(9, 5, "garage", 0)];

        let err = assemble(rows).unwrap_err();
        match err {
            StatusError::Codec(CodecError::UnknownBay(id)) => assert_eq!(id, "garage"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
