//! Group membership repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{administrators, group_memberships, members};

/// Group membership repository: the many-to-many relation between
/// administrators and members.
#[derive(Debug, Clone)]
pub struct GroupMembershipRepository {
    db: DatabaseConnection,
}

impl GroupMembershipRepository {
    /// Creates a new group membership repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a membership row.
    ///
    /// Uniqueness per (admin, member) pair is the composite primary key;
    /// a concurrent duplicate insert loses at the store and surfaces as a
    /// unique-violation `DbErr` (mapped to Conflict by the caller).
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn add(
        &self,
        admin_id: Uuid,
        member_id: Uuid,
    ) -> Result<group_memberships::Model, DbErr> {
        let row = group_memberships::ActiveModel {
            admin_id: Set(admin_id),
            member_id: Set(member_id),
            joined_at: Set(chrono::Utc::now().into()),
        };

        row.insert(&self.db).await
    }

    /// Removes one membership. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove(&self, admin_id: Uuid, member_id: Uuid) -> Result<bool, DbErr> {
        let result = group_memberships::Entity::delete_many()
            .filter(group_memberships::Column::AdminId.eq(admin_id))
            .filter(group_memberships::Column::MemberId.eq(member_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes every membership of an administrator's group. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove_all(&self, admin_id: Uuid) -> Result<u64, DbErr> {
        let result = group_memberships::Entity::delete_many()
            .filter(group_memberships::Column::AdminId.eq(admin_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Minimal projection: the raw membership rows of a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_admin(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<group_memberships::Model>, DbErr> {
        group_memberships::Entity::find()
            .filter(group_memberships::Column::AdminId.eq(admin_id))
            .order_by_desc(group_memberships::Column::JoinedAt)
            .all(&self.db)
            .await
    }

    /// Joined projection: the members of a group with their display
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_members_of(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<(group_memberships::Model, members::Model)>, DbErr> {
        group_memberships::Entity::find()
            .filter(group_memberships::Column::AdminId.eq(admin_id))
            .order_by_desc(group_memberships::Column::JoinedAt)
            .find_also_related(members::Entity)
            .all(&self.db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .filter_map(|(gm, member)| member.map(|m| (gm, m)))
                    .collect()
            })
    }

    /// Joined projection: the groups a member belongs to with the owning
    /// administrators' display fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_groups_of(
        &self,
        member_id: Uuid,
    ) -> Result<Vec<(group_memberships::Model, administrators::Model)>, DbErr> {
        group_memberships::Entity::find()
            .filter(group_memberships::Column::MemberId.eq(member_id))
            .order_by_desc(group_memberships::Column::JoinedAt)
            .find_also_related(administrators::Entity)
            .all(&self.db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .filter_map(|(gm, admin)| admin.map(|a| (gm, a)))
                    .collect()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_unique_violation;
    use crate::test_support::{seed_admin, seed_member, setup_test_db};

    #[tokio::test]
    async fn test_duplicate_pair_loses_at_the_store() {
        let db = setup_test_db().await.unwrap();
        let admin = seed_admin(&db, "GRP01").await;
        let member = seed_member(&db, "0812345678").await;
        let repo = GroupMembershipRepository::new(db);

        repo.add(admin.id, member.id).await.unwrap();

        let err = repo.add(admin.id, member.id).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_member_may_belong_to_two_groups() {
        let db = setup_test_db().await.unwrap();
        let first = seed_admin(&db, "GRP01").await;
        let second = seed_admin(&db, "GRP02").await;
        let member = seed_member(&db, "0812345678").await;
        let repo = GroupMembershipRepository::new(db);

        repo.add(first.id, member.id).await.unwrap();
        repo.add(second.id, member.id).await.unwrap();

        let groups = repo.list_groups_of(member.id).await.unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_reports_whether_a_pair_existed() {
        let db = setup_test_db().await.unwrap();
        let admin = seed_admin(&db, "GRP01").await;
        let member = seed_member(&db, "0812345678").await;
        let repo = GroupMembershipRepository::new(db);

        assert!(!repo.remove(admin.id, member.id).await.unwrap());

        repo.add(admin.id, member.id).await.unwrap();
        assert!(repo.remove(admin.id, member.id).await.unwrap());
        assert!(!repo.remove(admin.id, member.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_all_is_idempotent() {
        let db = setup_test_db().await.unwrap();
        let admin = seed_admin(&db, "GRP01").await;
        let a = seed_member(&db, "0812345678").await;
        let b = seed_member(&db, "0887654321").await;
        let repo = GroupMembershipRepository::new(db);

        repo.add(admin.id, a.id).await.unwrap();
        repo.add(admin.id, b.id).await.unwrap();

        assert_eq!(repo.remove_all(admin.id).await.unwrap(), 2);
        assert_eq!(repo.remove_all(admin.id).await.unwrap(), 0);
        assert!(repo.list_for_admin(admin.id).await.unwrap().is_empty());
    }
}
