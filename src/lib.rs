mod csv_utils;
mod dto;
mod error;
mod runner;
mod stores;

pub use dto::{Category, JournalOp, JournalRow, Transaction};
pub use error::{Error, ListenerFailure};
pub use runner::{run, run_async};
pub use stores::{ChangeLog, ListenerError, ListenerHandle, StoreListener, TransactionStore};
