use sea_orm::{DbErr, SqlErr};

/// Classifies store errors that map to domain outcomes rather than 500s.
pub trait DbErrExt {
    /// A unique index rejected the write (duplicate key, double booking).
    fn is_unique_violation(&self) -> bool;

    /// A foreign key rejected the write (parent row missing).
    fn is_foreign_key_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn is_foreign_key_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
    }
}
