//! Member repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::members;

/// Member repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a member by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find()
            .filter(members::Column::PhoneNumber.eq(phone))
            .one(&self.db)
            .await
    }

    /// Finds a member by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new member. The phone-number uniqueness constraint lives
    /// in the store; a duplicate insert surfaces as a unique-violation
    /// `DbErr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        display_name: &str,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<members::Model, DbErr> {
        let member = members::ActiveModel {
            id: Set(Uuid::new_v4()),
            display_name: Set(display_name.to_string()),
            phone_number: Set(phone_number.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set("member".to_string()),
            group_code: Set(None),
            is_active: Set(true),
            registered_at: Set(chrono::Utc::now().into()),
        };

        member.insert(&self.db).await
    }

    /// Checks if a phone number is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn phone_exists(&self, phone: &str) -> Result<bool, DbErr> {
        let count = members::Entity::find()
            .filter(members::Column::PhoneNumber.eq(phone))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Denormalizes a group code onto the member row (or clears it).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails or the member is absent.
    pub async fn set_group_code(
        &self,
        id: Uuid,
        group_code: Option<String>,
    ) -> Result<Option<members::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: members::ActiveModel = existing.into();
        active.group_code = Set(group_code);
        active.update(&self.db).await.map(Some)
    }

    /// Toggles the member's active flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<members::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: members::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.update(&self.db).await.map(Some)
    }
}
