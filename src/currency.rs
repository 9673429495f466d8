//! The currency domain model and database functions.
//!
//! Currencies label transaction amounts. The set is seeded at database
//! initialization and has no admin surface.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Alias for the integer type used for currency IDs.
pub type CurrencyId = i64;

/// A currency that a transaction amount is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Currency {
    /// The ID of the currency.
    pub id: CurrencyId,

    /// The ISO 4217 currency code, e.g., 'UAH'.
    pub code: String,

    /// The symbol shown next to amounts, e.g., '₴'.
    pub symbol: String,
}

/// Create a table for currencies.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_currency_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS currency (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            symbol TEXT NOT NULL
        );",
    )?;

    Ok(())
}

/// Insert the default currency set, skipping codes that already exist.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn seed_default_currencies(connection: &Connection) -> Result<(), rusqlite::Error> {
    const DEFAULT_CURRENCIES: [(&str, &str); 4] =
        [("UAH", "₴"), ("USD", "$"), ("EUR", "€"), ("GBP", "£")];

    let mut statement = connection
        .prepare("INSERT OR IGNORE INTO currency (code, symbol) VALUES (?1, ?2);")?;

    for (code, symbol) in DEFAULT_CURRENCIES {
        statement.execute((code, symbol))?;
    }

    Ok(())
}

/// Retrieve the currency with `currency_id` from the database.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_currency(currency_id: CurrencyId, connection: &Connection) -> Result<Currency, Error> {
    connection
        .prepare("SELECT id, code, symbol FROM currency WHERE id = :id;")?
        .query_row(&[(":id", &currency_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all currencies in the database, ordered by code.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_currencies(connection: &Connection) -> Result<Vec<Currency>, Error> {
    connection
        .prepare("SELECT id, code, symbol FROM currency ORDER BY code ASC;")?
        .query_map([], map_row)?
        .map(|maybe_currency| maybe_currency.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Currency, rusqlite::Error> {
    Ok(Currency {
        id: row.get(0)?,
        code: row.get(1)?,
        symbol: row.get(2)?,
    })
}

#[cfg(test)]
mod currency_tests {
    use rusqlite::Connection;

    use crate::Error;

    use super::{create_currency_table, get_all_currencies, get_currency, seed_default_currencies};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_currency_table(&connection).expect("Could not create currency table");
        connection
    }

    #[test]
    fn seed_inserts_default_currencies() {
        let connection = get_test_db_connection();

        seed_default_currencies(&connection).expect("Could not seed currencies");

        let codes: Vec<String> = get_all_currencies(&connection)
            .expect("Could not get currencies")
            .into_iter()
            .map(|currency| currency.code)
            .collect();
        assert_eq!(codes, ["EUR", "GBP", "UAH", "USD"]);
    }

    #[test]
    fn seed_is_idempotent() {
        let connection = get_test_db_connection();

        seed_default_currencies(&connection).expect("Could not seed currencies");
        seed_default_currencies(&connection).expect("Second seeding failed");

        let currencies = get_all_currencies(&connection).expect("Could not get currencies");
        assert_eq!(currencies.len(), 4);
    }

    #[test]
    fn get_currency_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        seed_default_currencies(&connection).expect("Could not seed currencies");

        let result = get_currency(999999, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }
}
