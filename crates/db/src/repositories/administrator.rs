//! Administrator repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::administrators;

/// Administrator repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AdministratorRepository {
    db: DatabaseConnection,
}

impl AdministratorRepository {
    /// Creates a new administrator repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an administrator by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<administrators::Model>, DbErr> {
        administrators::Entity::find()
            .filter(administrators::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds an administrator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<administrators::Model>, DbErr> {
        administrators::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds an administrator by group code. This is the resolution step
    /// behind member joins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<administrators::Model>, DbErr> {
        administrators::Entity::find()
            .filter(administrators::Column::CodeGroup.eq(code))
            .one(&self.db)
            .await
    }

    /// Creates a new administrator. Email and group-code uniqueness are
    /// store constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        display_name: &str,
        email: &str,
        password_hash: &str,
        code_group: &str,
        role: &str,
    ) -> Result<administrators::Model, DbErr> {
        let admin = administrators::ActiveModel {
            id: Set(Uuid::new_v4()),
            display_name: Set(display_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            code_group: Set(code_group.to_string()),
            role: Set(role.to_string()),
            registered_at: Set(chrono::Utc::now().into()),
        };

        admin.insert(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = administrators::Entity::find()
            .filter(administrators::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts all administrators; used by the seeder to decide whether
    /// the bootstrap superadmin is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        administrators::Entity::find().count(&self.db).await
    }
}
