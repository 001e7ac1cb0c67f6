use std::io::Write;
use std::path::Path;

use tracing::info;

use super::{apply, logged_store};
use crate::{
    csv_utils::{read_csv, write_csv},
    dto::JournalRow,
    Error,
};

/// Replays the journal at `input_path` into a new store and writes the final
/// transaction list to the provided writer.
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
pub fn run<P, W>(input_path: P, writer: W) -> Result<(), Error>
where
    P: AsRef<Path>,
    W: Write,
{
    let (mut store, log) = logged_store();

    for row in read_csv::<JournalRow, _>(input_path)? {
        // CSV parsing errors are critical - propagate them
        let row = row?;
        apply(&mut store, &row);
    }
    info!(
        transactions = store.len(),
        notifications = log.notifications(),
        "journal replayed"
    );

    write_csv(writer, store.transactions())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_input() -> Result<(), Box<dyn std::error::Error>> {
        let mut output = Vec::new();
        run("data/example_input.csv", &mut output)?;

        let expected = "id,amount,category
1,12.5,food
3,45.99,bills
5,20,entertainment
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[test]
    fn test_missing_input_file() {
        let result = run("data/does_not_exist.csv", Vec::new());
        assert!(matches!(result, Err(Error::Csv(_))));
    }
}
