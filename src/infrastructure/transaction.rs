use sea_orm::{ConnectionTrait, DatabaseTransaction, DbBackend, DbErr, SqlErr, Statement};

use crate::domain::error::DomainError;

/// Commit on success, roll back explicitly on failure. The domain error is
/// what the caller sees either way; a failed rollback is only logged.
pub async fn settle<T>(
    txn: DatabaseTransaction,
    result: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Serialize writers of one email's hold set until the transaction ends.
/// Postgres takes a transaction-scoped advisory lock keyed by the email;
/// SQLite already admits one writer at a time.
pub async fn lock_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<(), DbErr> {
    if db.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [email.into()],
    ))
    .await?;
    Ok(())
}
