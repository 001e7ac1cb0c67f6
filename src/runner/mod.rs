//! The runner replays a CSV journal of add/remove commands into a fresh
//! [`TransactionStore`] and writes the resulting transaction list to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner implementation.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::run as run_async;
pub use sync_runner::run;

use std::rc::Rc;

use tracing::warn;

use crate::dto::{JournalOp, JournalRow};
use crate::stores::{ChangeLog, ListenerHandle, TransactionStore};
use crate::Error;

/// Creates an empty store with a [`ChangeLog`] already registered.
fn logged_store() -> (TransactionStore, Rc<ChangeLog>) {
    let mut store = TransactionStore::new();
    let log = Rc::new(ChangeLog::new());
    let handle: ListenerHandle = log.clone();
    store.register(Some(handle));
    (store, log)
}

/// Applies one journal command. Rejected commands are logged and skipped.
///
/// Listener failures are logged too, but the command itself stays applied.
fn apply(store: &mut TransactionStore, row: &JournalRow) {
    let result = row.transaction().and_then(|transaction| match row.op {
        JournalOp::Add => store.add_transaction(Some(transaction)),
        JournalOp::Remove => store.remove_transaction(Some(&transaction)),
    });
    match result {
        Ok(()) => {}
        Err(Error::ListenersFailed(failures)) => {
            warn!(
                id = row.id,
                op = ?row.op,
                failed = failures.len(),
                "journal command applied; listeners failed"
            );
        }
        Err(err) => {
            warn!(id = row.id, op = ?row.op, error = %err, "journal command skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::ListenerError;
    use crate::Category;
    use rust_decimal_macros::dec;

    fn row(op: JournalOp, id: u32, amount: rust_decimal::Decimal) -> JournalRow {
        JournalRow {
            op,
            id,
            amount,
            category: Category::Food,
        }
    }

    #[test]
    fn test_apply_add_and_remove() {
        let (mut store, log) = logged_store();

        apply(&mut store, &row(JournalOp::Add, 1, dec!(5)));
        apply(&mut store, &row(JournalOp::Add, 2, dec!(6)));
        apply(&mut store, &row(JournalOp::Remove, 1, dec!(5)));

        let ids: Vec<u32> = store.transactions().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(log.notifications(), 3);
    }

    #[test]
    fn test_apply_skips_invalid_amount() {
        let (mut store, log) = logged_store();

        apply(&mut store, &row(JournalOp::Add, 1, dec!(0)));

        assert!(store.is_empty());
        assert_eq!(log.notifications(), 0);
    }

    #[test]
    fn test_apply_remove_requires_full_match() {
        let (mut store, _) = logged_store();
        apply(&mut store, &row(JournalOp::Add, 1, dec!(5)));

        // Same id, different amount: not the same transaction
        apply(&mut store, &row(JournalOp::Remove, 1, dec!(7)));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_keeps_command_when_listener_fails() {
        let (mut store, log) = logged_store();
        let failing: ListenerHandle =
            Rc::new(|_: &TransactionStore| -> Result<(), ListenerError> { Err("boom".into()) });
        store.register(Some(failing));

        apply(&mut store, &row(JournalOp::Add, 1, dec!(5)));

        let ids: Vec<u32> = store.transactions().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(log.notifications(), 1);
    }
}
