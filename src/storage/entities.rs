use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tracker::{record::AttendanceRecord, status::Status};

/// The struct used for storing records on the disk. Dates are kept as timestamps of the day's
/// start and an unset status is left out as `null`, which keeps blobs written by earlier
/// versions of the app readable.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct AttendanceRecordEntity {
    #[serde(with = "day_timestamp")]
    pub date: NaiveDate,
    #[serde(default)]
    pub status: Option<Status>,
}

impl From<AttendanceRecordEntity> for AttendanceRecord {
    fn from(AttendanceRecordEntity { date, status }: AttendanceRecordEntity) -> Self {
        AttendanceRecord::new(date, status.unwrap_or_default())
    }
}

impl From<&AttendanceRecord> for AttendanceRecordEntity {
    fn from(record: &AttendanceRecord) -> Self {
        AttendanceRecordEntity {
            date: record.date,
            status: match record.status {
                Status::Unset => None,
                status => Some(status),
            },
        }
    }
}

mod day_timestamp {
    use chrono::{DateTime, NaiveDate, SecondsFormat};
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::utils::time::{day_start_utc, tracker_offset};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&day_start_utc(*date).to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let moment = DateTime::parse_from_rfc3339(&s).map_err(serde::de::Error::custom)?;
        Ok(moment.with_timezone(&tracker_offset()).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::tracker::{record::AttendanceRecord, status::Status};

    use super::AttendanceRecordEntity;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_entity_format() {
        let entity = AttendanceRecordEntity::from(&AttendanceRecord::new(
            date(2024, 10, 25),
            Status::WorkFromHome,
        ));
        assert_eq!(
            serde_json::to_string(&entity).unwrap(),
            r#"{"date":"2024-10-24T18:30:00Z","status":"WFH"}"#
        );

        let entity = AttendanceRecordEntity::from(&AttendanceRecord::unset(date(2024, 10, 25)));
        assert_eq!(
            serde_json::to_string(&entity).unwrap(),
            r#"{"date":"2024-10-24T18:30:00Z","status":null}"#
        );
    }

    #[test]
    fn test_entity_reads_any_offset() {
        let entity: AttendanceRecordEntity =
            serde_json::from_str(r#"{"date":"2024-10-25T00:00:00+05:30","status":"Office"}"#)
                .unwrap();
        assert_eq!(entity.date, date(2024, 10, 25));

        // Late evening UTC is already the next day in the tracker zone
        let entity: AttendanceRecordEntity =
            serde_json::from_str(r#"{"date":"2024-10-25T20:00:00Z"}"#).unwrap();
        assert_eq!(entity.date, date(2024, 10, 26));
        assert_eq!(AttendanceRecord::from(entity).status, Status::Unset);
    }

    #[test]
    fn test_no_selection_is_unset() {
        let entity: AttendanceRecordEntity = serde_json::from_str(
            r#"{"date":"2024-10-24T18:30:00Z","status":"No Selection"}"#,
        )
        .unwrap();
        assert_eq!(
            AttendanceRecord::from(entity),
            AttendanceRecord::unset(date(2024, 10, 25))
        );
    }
}
