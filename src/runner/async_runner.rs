use std::io::Write;
use std::path::Path;

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::info;

use super::{apply, logged_store};
use crate::{csv_utils::write_csv, dto::JournalRow, Error};

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Replays the journal at `input_path` asynchronously and writes the final
/// transaction list to the provided writer.
///
/// A spawned reader task streams journal rows from the file, deserializes them
/// and sends them through a channel. The store itself is not `Send`, so it is
/// driven on the calling task until the reader closes the channel.
///
/// # Arguments
/// * `input_path` - Path to the CSV journal of add/remove commands
/// * `writer` - Where to write the transactions (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub async fn run<P, W>(input_path: P, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    let (tx, mut rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_journal(input_path, tx));

    let (mut store, log) = logged_store();
    while let Some(row) = rx.recv().await {
        apply(&mut store, &row);
    }

    // Reader is done once the channel closes; propagate any errors
    reader_handle.await??;
    info!(
        transactions = store.len(),
        notifications = log.notifications(),
        "journal replayed"
    );

    write_csv(writer, store.transactions())?;
    Ok(())
}

/// Reads and deserializes journal rows from a CSV file.
/// Returns them through the provided channel.
async fn read_journal(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<JournalRow>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<JournalRow>();
    while let Some(result) = records.next().await {
        // CSV parsing errors are critical - propagate them
        let row = result?;
        if tx.send(row).await.is_err() {
            // Receiver dropped, exit gracefully
            break;
        }
    }
    Ok(())
}
