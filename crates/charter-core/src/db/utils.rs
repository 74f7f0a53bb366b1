//! Row conversion helpers shared by the query modules.

use jiff::Timestamp;
use rusqlite::{types::Type, Row};

/// Storage form of a timestamp: microseconds since the Unix epoch.
pub(crate) fn timestamp_value(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

fn timestamp_from_value(idx: usize, micros: i64) -> rusqlite::Result<Timestamp> {
    Timestamp::from_microsecond(micros)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Reads a required timestamp column.
pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    timestamp_from_value(idx, row.get(idx)?)
}

/// Reads an optional timestamp column.
pub(crate) fn optional_timestamp_at(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|micros| timestamp_from_value(idx, micros))
        .transpose()
}

/// Reads an INTEGER id column as `u64`.
pub(crate) fn id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let raw: i64 = row.get(idx)?;
    u64::try_from(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Reads an optional INTEGER id column as `u64`.
pub(crate) fn optional_id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u64>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|raw| {
            u64::try_from(raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
            })
        })
        .transpose()
}

/// Builds a `LIKE` pattern matching `term` anywhere.
pub(crate) fn contains_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}
