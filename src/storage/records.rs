use std::collections::HashSet;

use anyhow::Result;
use tracing::{debug, error, warn};

use crate::tracker::record::AttendanceRecord;

use super::{entities::AttendanceRecordEntity, key_value::KeyValueStore};

/// Key the whole record list is stored under.
pub const RECORDS_KEY: &str = "attendanceRecords";

pub fn encode_records(records: &[AttendanceRecord]) -> Result<Vec<u8>> {
    let entities = records
        .iter()
        .map(AttendanceRecordEntity::from)
        .collect::<Vec<_>>();
    Ok(serde_json::to_vec(&entities)?)
}

/// Decodes a stored blob. When a day appears more than once the first record is kept.
pub fn decode_records(blob: &[u8]) -> Result<Vec<AttendanceRecord>> {
    let entities = serde_json::from_slice::<Vec<AttendanceRecordEntity>>(blob)?;
    let mut seen = HashSet::with_capacity(entities.len());
    Ok(entities
        .into_iter()
        .map(AttendanceRecord::from)
        .filter(|record| seen.insert(record.date))
        .collect())
}

/// Reads previously saved records. Nothing stored, an unreadable store and a corrupted blob all
/// end up as an empty list.
pub async fn load_records(store: &dyn KeyValueStore) -> Vec<AttendanceRecord> {
    let blob = match store.get(RECORDS_KEY).await {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("No records were stored yet");
            return vec![];
        }
        Err(e) => {
            error!("Failed to read stored records {e:?}");
            return vec![];
        }
    };

    match decode_records(&blob) {
        Ok(records) => {
            debug!("Loaded {} records", records.len());
            records
        }
        Err(e) => {
            warn!("Stored records are corrupted, starting from scratch {e}");
            vec![]
        }
    }
}

pub async fn save_records(store: &dyn KeyValueStore, records: &[AttendanceRecord]) -> Result<()> {
    let blob = encode_records(records)?;
    store.set(RECORDS_KEY, blob).await
}
