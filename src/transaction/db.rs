//! Database functions for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    transaction::{DetailedTransaction, NewTransaction, Transaction, TransactionId},
};

/// Create a table for transactions.
///
/// Transactions are deleted with their category. The currency of a
/// transaction cannot be deleted because currencies have no delete surface.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE CASCADE,
            currency_id INTEGER NOT NULL REFERENCES currency(id)
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
    )?;

    Ok(())
}

/// Create a new transaction in the database.
///
/// The caller is expected to have validated `new_transaction` with
/// [NewTransaction::validate] and checked that the category and currency
/// exist.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category_id, currency_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, description, category_id, currency_id",
        )?
        .query_row(
            (
                new_transaction.amount,
                new_transaction.date,
                new_transaction.description,
                new_transaction.category_id,
                new_transaction.currency_id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, description, category_id, currency_id
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions joined with their category, operation and
/// currency, most recent first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_detailed_transactions(
    connection: &Connection,
) -> Result<Vec<DetailedTransaction>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".id, \"transaction\".amount, \"transaction\".date,
                    \"transaction\".description, category.name, operation.name,
                    operation.is_income, currency.symbol
             FROM \"transaction\"
             INNER JOIN category ON category.id = \"transaction\".category_id
             INNER JOIN operation ON operation.id = category.operation_id
             INNER JOIN currency ON currency.id = \"transaction\".currency_id
             ORDER BY \"transaction\".date DESC, \"transaction\".id DESC",
        )?
        .query_map([], |row| {
            Ok(DetailedTransaction {
                id: row.get(0)?,
                amount: row.get(1)?,
                date: row.get(2)?,
                description: row.get(3)?,
                category_name: row.get(4)?,
                operation_name: row.get(5)?,
                operation_is_income: row.get(6)?,
                currency_symbol: row.get(7)?,
            })
        })?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Delete a transaction from the database.
///
/// # Errors
/// This function will return an error if there is an SQL error or if the transaction doesn't exist.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        currency_id: row.get(5)?,
    })
}
