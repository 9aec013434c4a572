//! Database operations for categories.
//!
//! Every query is scoped to the owning user, a category that belongs to someone else is
//! reported as missing.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    user::UserID,
};

/// Initialize the category table and indexes.
///
/// Category names are unique per user, ignoring case.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_category_user_name
            ON category(user_id, name COLLATE NOCASE);",
    )?;

    Ok(())
}

/// Create a category for `user_id` and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::DuplicateCategoryName] if the user already has a category with this name.
pub fn create_category(
    user_id: UserID,
    name: CategoryName,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name, user_id) VALUES (?1, ?2);",
            (name.as_ref(), user_id.as_i64()),
        )
        .map_err(|error| map_unique_name_error(error, &name))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a single category owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id AND user_id = :user_id;")?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound(category_id),
            error => error.into(),
        })
}

/// Retrieve all of a user's categories ordered alphabetically by name.
pub fn get_categories_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name FROM category WHERE user_id = :user_id
            ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Check whether the user has a category called `name`, ignoring case.
///
/// The category `excluding` is left out of the check, this lets a category be renamed to a
/// different casing of its own name.
pub fn category_name_taken(
    user_id: UserID,
    name: &CategoryName,
    excluding: Option<CategoryId>,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM category
                WHERE user_id = ?1 AND name = ?2 COLLATE NOCASE AND (?3 IS NULL OR id != ?3)
            )",
            (user_id.as_i64(), name.as_ref(), excluding),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Rename a category owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user,
/// or [Error::DuplicateCategoryName] if the new name is taken.
pub fn update_category(
    category_id: CategoryId,
    user_id: UserID,
    new_name: &CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1 WHERE id = ?2 AND user_id = ?3",
            (new_name.as_ref(), category_id, user_id.as_i64()),
        )
        .map_err(|error| map_unique_name_error(error, new_name))?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound(category_id));
    }

    Ok(())
}

/// Delete a category owned by `user_id`.
///
/// Transactions in the category are kept, their category is cleared by the foreign key.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound(category_id));
    }

    Ok(())
}

fn map_unique_name_error(error: rusqlite::Error, name: &CategoryName) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(sql_error, _)
            if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::DuplicateCategoryName(name.to_string())
        }
        error => error.into(),
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            CategoryName, category_name_taken, create_category, delete_category,
            get_categories_by_user, get_category, update_category,
        },
        test_utils::{get_test_connection, insert_test_user},
        user::{User, delete_user},
    };

    fn get_connection_with_user() -> (Connection, User) {
        let connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);

        (connection, user)
    }

    #[test]
    fn create_category_succeeds() {
        let (connection, user) = get_connection_with_user();
        let name = CategoryName::new("Food").unwrap();

        let category = create_category(user.id, name.clone(), &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
    }

    #[test]
    fn create_category_fails_on_duplicate_name_ignoring_case() {
        let (connection, user) = get_connection_with_user();
        create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();

        let result = create_category(user.id, CategoryName::new_unchecked("FOOD"), &connection);

        assert_eq!(result, Err(Error::DuplicateCategoryName("FOOD".to_owned())));
    }

    #[test]
    fn same_name_is_allowed_for_different_users() {
        let (connection, user) = get_connection_with_user();
        let other_user = insert_test_user("other@example.com", &connection);
        create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();

        let result = create_category(
            other_user.id,
            CategoryName::new_unchecked("Food"),
            &connection,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn get_category_of_other_user_is_not_found() {
        let (connection, user) = get_connection_with_user();
        let other_user = insert_test_user("other@example.com", &connection);
        let category =
            create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();

        let result = get_category(category.id, other_user.id, &connection);

        assert_eq!(result, Err(Error::CategoryNotFound(category.id)));
    }

    #[test]
    fn get_categories_is_sorted_by_name() {
        let (connection, user) = get_connection_with_user();
        for name in ["rent", "Food", "Bills"] {
            create_category(user.id, CategoryName::new_unchecked(name), &connection).unwrap();
        }

        let names: Vec<String> = get_categories_by_user(user.id, &connection)
            .unwrap()
            .into_iter()
            .map(|category| category.name.to_string())
            .collect();

        assert_eq!(names, ["Bills", "Food", "rent"]);
    }

    #[test]
    fn name_taken_ignores_the_excluded_category() {
        let (connection, user) = get_connection_with_user();
        let category =
            create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();
        let name = CategoryName::new_unchecked("food");

        assert_eq!(category_name_taken(user.id, &name, None, &connection), Ok(true));
        assert_eq!(
            category_name_taken(user.id, &name, Some(category.id), &connection),
            Ok(false)
        );
    }

    #[test]
    fn update_missing_category_is_not_found() {
        let (connection, user) = get_connection_with_user();

        let result = update_category(
            99,
            user.id,
            &CategoryName::new_unchecked("Food"),
            &connection,
        );

        assert_eq!(result, Err(Error::CategoryNotFound(99)));
    }

    #[test]
    fn delete_category_of_other_user_is_not_found() {
        let (connection, user) = get_connection_with_user();
        let other_user = insert_test_user("other@example.com", &connection);
        let category =
            create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();

        let result = delete_category(category.id, other_user.id, &connection);

        assert_eq!(result, Err(Error::CategoryNotFound(category.id)));
        assert!(get_category(category.id, user.id, &connection).is_ok());
    }

    #[test]
    fn deleting_user_deletes_their_categories() {
        let (connection, user) = get_connection_with_user();
        create_category(user.id, CategoryName::new_unchecked("Food"), &connection).unwrap();

        delete_user(user.id, &connection).unwrap();

        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
