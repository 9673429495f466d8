//! Database functions for operations.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    operation::{Operation, OperationId, OperationName},
};

/// Create a table for operations.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_operation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS operation (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            is_income INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_operation_name ON operation(name);",
    )?;

    Ok(())
}

/// Create an operation in the database.
///
/// # Errors
/// This function will return an [Error::DuplicateOperationName] if an
/// operation with the same name already exists, or an [Error::SqlError] if
/// there is some other SQL error.
pub fn create_operation(
    name: OperationName,
    is_income: bool,
    connection: &Connection,
) -> Result<Operation, Error> {
    connection
        .execute(
            "INSERT INTO operation (name, is_income) VALUES (?1, ?2);",
            (name.as_ref(), is_income),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 2067 => {
                Error::DuplicateOperationName(name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Operation {
        id,
        name,
        is_income,
    })
}

/// Retrieve the operation with `operation_id` from the database.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_operation(operation_id: OperationId, connection: &Connection) -> Result<Operation, Error> {
    connection
        .prepare("SELECT id, name, is_income FROM operation WHERE id = :id;")?
        .query_row(&[(":id", &operation_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all operations in the database, ordered by name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_operations(connection: &Connection) -> Result<Vec<Operation>, Error> {
    connection
        .prepare("SELECT id, name, is_income FROM operation ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_operation| maybe_operation.map_err(|error| error.into()))
        .collect()
}

/// Delete an operation from the database.
///
/// Categories attached to the operation, and their transactions, are
/// deleted with it.
///
/// # Errors
/// This function will return an error if there is an SQL error or if the operation doesn't exist.
pub fn delete_operation(operation_id: OperationId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM operation WHERE id = ?1", [operation_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingOperation);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Operation, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = OperationName::new_unchecked(&raw_name);
    let is_income = row.get(2)?;

    Ok(Operation {
        id,
        name,
        is_income,
    })
}

#[cfg(test)]
mod operation_query_tests {
    use rusqlite::Connection;

    use crate::{Error, operation::OperationName};

    use super::{
        create_operation, create_operation_table, delete_operation, get_all_operations,
        get_operation,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_operation_table(&connection).expect("Could not create operation table");
        connection
    }

    #[test]
    fn create_operation_succeeds() {
        let connection = get_test_db_connection();
        let name = OperationName::new("Salary").unwrap();

        let operation = create_operation(name.clone(), true, &connection);

        let got_operation = operation.expect("Could not create operation");
        assert!(got_operation.id > 0);
        assert_eq!(got_operation.name, name);
        assert!(got_operation.is_income);
    }

    #[test]
    fn create_operation_with_duplicate_name_fails() {
        let connection = get_test_db_connection();
        let name = OperationName::new_unchecked("Salary");
        create_operation(name.clone(), true, &connection).expect("Could not create test operation");

        let result = create_operation(name, false, &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateOperationName("Salary".to_owned()))
        );
    }

    #[test]
    fn get_operation_succeeds() {
        let connection = get_test_db_connection();
        let inserted = create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
            .expect("Could not create test operation");

        let selected = get_operation(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_operation_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted = create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
            .expect("Could not create test operation");

        let selected = get_operation(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_operations_orders_by_name() {
        let connection = get_test_db_connection();
        create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
            .expect("Could not create test operation");
        create_operation(OperationName::new_unchecked("Salary"), true, &connection)
            .expect("Could not create test operation");

        let names: Vec<String> = get_all_operations(&connection)
            .expect("Could not get all operations")
            .into_iter()
            .map(|operation| operation.name.to_string())
            .collect();

        assert_eq!(names, ["Salary", "Shopping"]);
    }

    #[test]
    fn delete_operation_succeeds() {
        let connection = get_test_db_connection();
        let operation = create_operation(OperationName::new_unchecked("ToDelete"), false, &connection)
            .expect("Could not create test operation");

        let result = delete_operation(operation.id, &connection);

        assert!(result.is_ok());
        assert_eq!(get_operation(operation.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_operation_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = delete_operation(999999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingOperation));
    }
}
