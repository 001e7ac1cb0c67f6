//! Observable transaction storage.
//!
//! Holds the ordered list of transactions together with the indices of the
//! transactions matched by the last filter run, and notifies registered
//! listeners after every state change.
//!
//! Callers only ever get copies of the internal sequences back. The matched
//! indices are cleared on every transaction mutation, since positions shift
//! as soon as the list changes.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use super::ListenerHandle;
use crate::error::ListenerFailure;
use crate::{Error, Transaction};

#[derive(Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    /// Valid positions into `transactions` as of the last `set_matched_filter_indices`
    matched_filter_indices: Vec<usize>,
    /// Registration order is notification order
    listeners: Vec<ListenerHandle>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            matched_filter_indices: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Appends a transaction, drops the stale filter result and notifies listeners.
    /// Fails with `InvalidArgument` when no transaction is given; nothing changes then.
    pub fn add_transaction(&mut self, transaction: Option<Transaction>) -> Result<(), Error> {
        let transaction = transaction.ok_or_else(|| {
            Error::InvalidArgument("the new transaction must be present".to_string())
        })?;
        self.transactions.push(transaction);
        self.matched_filter_indices.clear();
        debug!(transactions = self.transactions.len(), "transaction added");
        self.state_changed()
    }

    /// Removes the first transaction equal to the given one, if any.
    ///
    /// Never fails on input: a missing or absent transaction still clears the
    /// filter result and notifies listeners.
    pub fn remove_transaction(&mut self, transaction: Option<&Transaction>) -> Result<(), Error> {
        let position = transaction
            .and_then(|t| self.transactions.iter().position(|stored| stored == t));
        if let Some(position) = position {
            self.transactions.remove(position);
        }
        self.matched_filter_indices.clear();
        debug!(
            removed = position.is_some(),
            transactions = self.transactions.len(),
            "transaction removal"
        );
        self.state_changed()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Replaces the matched filter indices and notifies listeners.
    ///
    /// Every index must lie in `[0, len)`. Validation happens before any
    /// change, so a rejected call leaves the store untouched and silent.
    pub fn set_matched_filter_indices(&mut self, indices: Option<Vec<i64>>) -> Result<(), Error> {
        let indices = indices.ok_or_else(|| {
            Error::InvalidArgument("the matched filter indices must be present".to_string())
        })?;
        let len = self.transactions.len();
        let validated = indices
            .iter()
            .map(|&index| {
                usize::try_from(index)
                    .ok()
                    .filter(|&index| index < len)
                    .ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "matched filter index {} is outside [0, {})",
                            index, len
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.matched_filter_indices = validated;
        debug!(matched = self.matched_filter_indices.len(), "filter result set");
        self.state_changed()
    }

    pub fn matched_filter_indices(&self) -> Vec<usize> {
        self.matched_filter_indices.clone()
    }

    /// Copies of the transactions at the matched indices, in index order.
    pub fn matched_transactions(&self) -> Vec<Transaction> {
        self.matched_filter_indices
            .iter()
            .filter_map(|&index| self.transactions.get(index).cloned())
            .collect()
    }

    /// Registers a listener. Returns false if it is absent or already registered.
    pub fn register(&mut self, listener: Option<ListenerHandle>) -> bool {
        match listener {
            Some(listener) if !self.contains_listener(Some(&listener)) => {
                self.listeners.push(listener);
                true
            }
            _ => false,
        }
    }

    /// Unregisters a listener. Returns false if it is absent or not registered.
    pub fn unregister(&mut self, listener: Option<&ListenerHandle>) -> bool {
        let Some(listener) = listener else {
            return false;
        };
        match self.listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(position) => {
                self.listeners.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn number_of_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn contains_listener(&self, listener: Option<&ListenerHandle>) -> bool {
        listener.is_some_and(|listener| self.listeners.iter().any(|l| Rc::ptr_eq(l, listener)))
    }

    /// Notifies every listener, even after one fails, then reports the failures.
    /// The state change has already happened by the time an error is returned.
    fn state_changed(&self) -> Result<(), Error> {
        let failures: Vec<ListenerFailure> = self
            .listeners
            .iter()
            .enumerate()
            .filter_map(|(position, listener)| {
                listener.update(self).err().map(|err| {
                    warn!(position, error = %err, "listener failed to handle state change");
                    ListenerFailure {
                        position,
                        message: err.to_string(),
                    }
                })
            })
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ListenersFailed(failures))
        }
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .field("matched_filter_indices", &self.matched_filter_indices)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
