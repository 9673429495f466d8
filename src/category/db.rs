//! Database functions for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, CategoryWithOperation},
    operation::OperationId,
};

/// Create a table for categories.
///
/// Categories are deleted with their operation.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            operation_id INTEGER NOT NULL REFERENCES operation(id) ON DELETE CASCADE,
            UNIQUE(name, operation_id)
        );

        CREATE INDEX IF NOT EXISTS idx_category_operation ON category(operation_id);",
    )?;

    Ok(())
}

/// Create a category in the database.
///
/// # Errors
/// This function will return an [Error::DuplicateCategoryName] if the
/// operation already has a category with the same name, or an
/// [Error::SqlError] if there is some other SQL error.
pub fn create_category(
    name: CategoryName,
    operation_id: OperationId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name, operation_id) VALUES (?1, ?2);",
            (name.as_ref(), operation_id),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 2067 => {
                Error::DuplicateCategoryName(name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        operation_id,
    })
}

/// Retrieve the category with `category_id` from the database.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, operation_id FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories joined with their operation name, ordered by
/// category name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_categories_with_operation(
    connection: &Connection,
) -> Result<Vec<CategoryWithOperation>, Error> {
    connection
        .prepare(
            "SELECT category.id, category.name, category.operation_id, operation.name
             FROM category
             INNER JOIN operation ON operation.id = category.operation_id
             ORDER BY category.name ASC;",
        )?
        .query_map([], |row| {
            let category = map_row(row)?;
            let operation_name = row.get(3)?;

            Ok(CategoryWithOperation {
                category,
                operation_name,
            })
        })?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the categories belonging to the operation with `operation_id`,
/// ordered by name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_categories_by_operation(
    operation_id: OperationId,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, operation_id FROM category
             WHERE operation_id = :operation_id ORDER BY name ASC;",
        )?
        .query_map(&[(":operation_id", &operation_id)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category from the database.
///
/// Transactions in the category are deleted with it.
///
/// # Errors
/// This function will return an error if there is an SQL error or if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let operation_id = row.get(2)?;

    Ok(Category {
        id,
        name,
        operation_id,
    })
}
