//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Lookups and inserts each check out one pooled connection and return it on
//! drop, so every exit path releases the connection. Unique index violations
//! on `username` or `email` map to `UserPersistenceError::UniqueViolation`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, UserValidationError, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(%error, "diesel operation failed");

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => UserPersistenceError::unique_violation(
                info.constraint_name()
                    .unwrap_or("users unique constraint")
                    .to_owned(),
            ),
            DatabaseErrorKind::ClosedConnection => {
                UserPersistenceError::connection("database connection error")
            }
            _ => UserPersistenceError::query("database error"),
        },
        _ => UserPersistenceError::query("database error"),
    }
}

fn corrupted(column: &str, error: UserValidationError) -> UserPersistenceError {
    warn!(column, %error, "stored user row violates domain invariants");
    UserPersistenceError::query(format!("corrupted {column} in database: {error}"))
}

/// Convert a database row to a domain `User`.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    Ok(User {
        id: UserId::from_uuid(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        username: Username::new(&row.username).map_err(|err| corrupted("username", err))?,
        email: EmailAddress::new(&row.email).map_err(|err| corrupted("email", err))?,
        password_hash: PasswordHash::from_phc(row.password_hash),
        birthdate: row.birthdate,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_conflicts(
        &self,
        email: &EmailAddress,
        username: &Username,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(
                users::email
                    .eq(email.as_ref())
                    .or(users::username.eq(username.as_ref())),
            )
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
            birthdate: user.birthdate,
            created_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str, email: &str) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: username.into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            created_at: Utc
                .with_ymd_and_hms(2026, 10, 19, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_unique_violation() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        ));

        assert!(
            matches!(err, UserPersistenceError::UniqueViolation { .. }),
            "expected UniqueViolation, got {err:?}"
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("fk".to_owned()),
        ),
        "database error"
    )]
    fn other_diesel_errors_map_to_query_errors(
        #[case] error: DieselError,
        #[case] expected: &str,
    ) {
        assert_eq!(map_diesel_error(error), UserPersistenceError::query(expected));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));

        assert_eq!(
            err,
            UserPersistenceError::connection("database connection error")
        );
    }

    #[rstest]
    fn row_converts_to_domain_user() {
        let user = row_to_user(row("ada", "a@x.com")).expect("valid row");

        assert_eq!(user.username.as_ref(), "ada");
        assert_eq!(user.email.as_ref(), "a@x.com");
        assert_eq!(user.password_hash.as_str(), "$argon2id$stub");
    }

    #[rstest]
    fn corrupted_username_is_reported_as_query_error() {
        let err = row_to_user(row("not valid", "a@x.com")).expect_err("corrupted row");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert!(err.to_string().contains("corrupted username"));
    }
}
