//! Observer side of the store.
//!
//! A listener is anything that implements [`StoreListener`]; closures of the
//! right shape qualify through a blanket impl. Listeners are held as
//! [`ListenerHandle`]s and compared by pointer, so registering two clones of
//! the same `Rc` counts as one registration.

use std::cell::{Cell, RefCell};
use std::error::Error as StdError;
use std::rc::Rc;

use super::TransactionStore;

pub type ListenerError = Box<dyn StdError>;

/// Shared handle to a registered listener.
pub type ListenerHandle = Rc<dyn StoreListener>;

pub trait StoreListener {
    /// Called after every state change, with read-only access to the store.
    fn update(&self, store: &TransactionStore) -> Result<(), ListenerError>;
}

impl<F> StoreListener for F
where
    F: Fn(&TransactionStore) -> Result<(), ListenerError>,
{
    fn update(&self, store: &TransactionStore) -> Result<(), ListenerError> {
        self(store)
    }
}

/// Listener that counts notifications and logs each one.
#[derive(Debug, Default)]
pub struct ChangeLog {
    notifications: Cell<usize>,
    /// Transaction count observed at each notification.
    sizes: RefCell<Vec<usize>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> usize {
        self.notifications.get()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.sizes.borrow().clone()
    }
}

impl StoreListener for ChangeLog {
    fn update(&self, store: &TransactionStore) -> Result<(), ListenerError> {
        let seen = self.notifications.get() + 1;
        self.notifications.set(seen);
        self.sizes.borrow_mut().push(store.len());
        tracing::info!(
            notification = seen,
            transactions = store.len(),
            matched = store.matched_filter_indices().len(),
            "store changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Transaction};
    use rust_decimal_macros::dec;

    #[test]
    fn test_change_log_records_sizes() {
        let mut store = TransactionStore::new();
        let log = Rc::new(ChangeLog::new());
        let handle: ListenerHandle = log.clone();
        assert!(store.register(Some(handle)));

        let t = Transaction::new(1, dec!(10), Category::Food).unwrap();
        store.add_transaction(Some(t.clone())).unwrap();
        store.add_transaction(Some(t.clone())).unwrap();
        store.remove_transaction(Some(&t)).unwrap();

        assert_eq!(log.notifications(), 3);
        assert_eq!(log.sizes(), vec![1, 2, 1]);
    }

    #[test]
    fn test_closure_listener() {
        let mut store = TransactionStore::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let listener: ListenerHandle = Rc::new(move |_: &TransactionStore| -> Result<(), ListenerError> {
            counter.set(counter.get() + 1);
            Ok(())
        });
        assert!(store.register(Some(listener)));

        store
            .add_transaction(Some(Transaction::new(1, dec!(1), Category::Other).unwrap()))
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_clones_of_one_handle_are_the_same_listener() {
        let mut store = TransactionStore::new();
        let log: ListenerHandle = Rc::new(ChangeLog::new());
        let alias = log.clone();

        assert!(store.register(Some(log)));
        assert!(!store.register(Some(alias.clone())));
        assert!(store.contains_listener(Some(&alias)));
        assert_eq!(store.number_of_listeners(), 1);
    }
}
