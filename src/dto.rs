use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Travel,
    Bills,
    Entertainment,
    Other,
}

/// A single expense entry. Immutable once built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Transaction {
    id: u32,
    amount: Decimal,
    category: Category,
}

impl Transaction {
    /// Builds a transaction, rejecting amounts that are zero or negative.
    pub fn new(id: u32, amount: Decimal, category: Category) -> Result<Self, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidArgument(format!(
                "transaction {} amount must be positive, got {}",
                id, amount
            )));
        }
        Ok(Self {
            id,
            amount,
            category,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JournalOp {
    Add,
    Remove,
}

/// One row of a replay journal: `type,id,amount,category`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct JournalRow {
    #[serde(rename = "type")]
    pub op: JournalOp,
    pub id: u32,
    #[serde(deserialize_with = "deserialize_decimal_2dp")]
    pub amount: Decimal,
    pub category: Category,
}

impl JournalRow {
    pub fn transaction(&self) -> Result<Transaction, Error> {
        Transaction::new(self.id, self.amount, self.category)
    }
}

fn deserialize_decimal_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer)
        .map(|dec| dec.round_dp_with_strategy(2, RoundingStrategy::ToZero))
}
