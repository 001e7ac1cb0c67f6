//! Storage layer for the expense tracker model. Provides:
//! - The observable transaction list and filter result ([`TransactionStore`])
//! - The observer capability and stock listeners ([`StoreListener`], [`ChangeLog`])
//!
//! Everything here is single-threaded: listener handles are `Rc`, so a
//! store cannot cross threads without external synchronization.

mod listeners;
mod transactions;

pub use listeners::{ChangeLog, ListenerError, ListenerHandle, StoreListener};
pub use transactions::TransactionStore;
