//! CSV serialization and deserialization utilities.
//!
//! Provides generic functions for reading journals and writing transaction lists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Opens a journal file and yields its rows one at a time, deserialized into `T`
/// (a [`JournalRow`](crate::JournalRow) for the runners). The header row names the
/// fields; headers and fields are trimmed, so `add, 1, 2.5, food` parses.
/// A malformed row surfaces as an `Err` item and does not end the iterator.
pub fn read_csv<T, P>(path: P) -> csv::Result<impl Iterator<Item = csv::Result<T>>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?
        .into_deserialize())
}

/// Writes a transaction list (or any serializable records) to `writer` as CSV.
/// The header row comes from the field names of `T`, e.g. `id,amount,category`
/// for a [`Transaction`](crate::Transaction). The writer is flushed before returning.
pub fn write_csv<T, W>(writer: W, records: impl IntoIterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
