//! The transaction domain model.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::CategoryId, currency::CurrencyId};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// An expense or income: an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always positive; the direction comes from the category's operation.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The ID of the currency the amount is denominated in.
    pub currency_id: CurrencyId,
}

/// The data needed to create a [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The ID of the currency the amount is denominated in.
    pub currency_id: CurrencyId,
}

impl NewTransaction {
    /// Check the invariants that do not need the database.
    ///
    /// `today` is the latest date the transaction may carry: transactions
    /// record events that have already happened.
    ///
    /// # Errors
    /// This function will return an [Error::NonPositiveAmount] if the amount
    /// is zero or negative, or an [Error::FutureDate] if the date is after
    /// `today`.
    pub fn validate(&self, today: Date) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        Ok(())
    }
}

/// A transaction joined with the names needed to display it: the category,
/// its operation and the currency symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedTransaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The name of the transaction's category.
    pub category_name: String,
    /// The name of the category's operation.
    pub operation_name: String,
    /// Whether the operation represents income.
    pub operation_is_income: bool,
    /// The symbol of the transaction's currency.
    pub currency_symbol: String,
}
