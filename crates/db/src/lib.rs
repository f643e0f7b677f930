//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the two principal tables and the
//!   three financial/membership tables
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AdministratorRepository, ContributionRepository, GroupMembershipRepository, LoanRepository,
    MemberRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};

/// Establishes a pooled connection to the database.
///
/// The pool is opened once at process start and handed to the API layer
/// through `AppState`; nothing in this crate holds global connection
/// state.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection with explicit pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_pool(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .min_connections(min_connections);
    Database::connect(options).await
}

/// True if the error is a store-level unique constraint violation.
///
/// Duplicate phone/email/group-code registrations and concurrent joins of
/// the same (admin, member) pair are resolved by the store's constraints,
/// not by read-then-write checks; callers map this case to a 409.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared helpers for repository tests.
    //!
    //! `setup_test_db` connects an in-memory database and creates the
    //! principal and membership tables from the entity definitions, so
    //! the composite primary key and the unique indexes are live and the
    //! tests exercise real store constraints.

    use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

    use crate::entities::{administrators, group_memberships, members};
    use crate::repositories::{AdministratorRepository, MemberRepository};

    pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let builder = db.get_database_backend();
        let schema = Schema::new(builder);

        db.execute(builder.build(&schema.create_table_from_entity(members::Entity)))
            .await?;
        db.execute(builder.build(&schema.create_table_from_entity(administrators::Entity)))
            .await?;
        db.execute(builder.build(&schema.create_table_from_entity(group_memberships::Entity)))
            .await?;

        Ok(db)
    }

    pub async fn seed_admin(db: &DatabaseConnection, code_group: &str) -> administrators::Model {
        AdministratorRepository::new(db.clone())
            .create(
                "Bu Rina",
                &format!("{code_group}@example.com"),
                "$argon2id$stub",
                code_group,
                "admin",
            )
            .await
            .expect("seed administrator")
    }

    pub async fn seed_member(db: &DatabaseConnection, phone_number: &str) -> members::Model {
        MemberRepository::new(db.clone())
            .create("Andi", phone_number, "$argon2id$stub")
            .await
            .expect("seed member")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_is_not_a_unique_violation() {
        let err = DbErr::RecordNotFound("loan".to_string());
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn test_custom_error_is_not_a_unique_violation() {
        let err = DbErr::Custom("connection reset".to_string());
        assert!(!is_unique_violation(&err));
    }
}
