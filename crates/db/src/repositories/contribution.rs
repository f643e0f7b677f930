//! Contribution repository for database operations.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use simpanan_shared::types::PageRequest;

use crate::entities::contributions;

/// Contribution repository: the append-style money ledger.
#[derive(Debug, Clone)]
pub struct ContributionRepository {
    db: DatabaseConnection,
}

impl ContributionRepository {
    /// Creates a new contribution repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a contribution for an owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(
        &self,
        owner_id: Uuid,
        amount: Decimal,
        attachment_url: Option<String>,
    ) -> Result<contributions::Model, DbErr> {
        let row = contributions::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            amount: Set(amount),
            attachment_url: Set(attachment_url),
            recorded_at: Set(chrono::Utc::now().into()),
        };

        row.insert(&self.db).await
    }

    /// Finds a contribution by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<contributions::Model>, DbErr> {
        contributions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns the accumulated total for an owner.
    ///
    /// Always a live aggregate over committed rows; `Decimal::ZERO` (not
    /// null) for an owner with no contributions. Never cached in a
    /// second column.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_for(&self, owner_id: Uuid) -> Result<Decimal, DbErr> {
        let total: Option<Option<Decimal>> = contributions::Entity::find()
            .select_only()
            .column_as(Expr::col(contributions::Column::Amount).sum(), "total")
            .filter(contributions::Column::OwnerId.eq(owner_id))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Lists an owner's contributions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, owner_id: Uuid) -> Result<Vec<contributions::Model>, DbErr> {
        contributions::Entity::find()
            .filter(contributions::Column::OwnerId.eq(owner_id))
            .order_by_desc(contributions::Column::RecordedAt)
            .all(&self.db)
            .await
    }

    /// Lists all contributions, newest first, offset-paginated.
    ///
    /// Returns the page plus the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<contributions::Model>, u64), DbErr> {
        let paginator = contributions::Entity::find()
            .order_by_desc(contributions::Column::RecordedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Corrects a contribution amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_amount(
        &self,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Option<contributions::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: contributions::ActiveModel = existing.into();
        active.amount = Set(amount);
        active.update(&self.db).await.map(Some)
    }

    /// Deletes a contribution. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = contributions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn sum_row(total: Option<Decimal>) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("total", Value::Decimal(total.map(Box::new)))])
    }

    #[tokio::test]
    async fn test_total_for_owner_with_no_rows_is_zero() {
        // SUM over an empty set comes back as a null aggregate row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sum_row(None)]])
            .into_connection();
        let repo = ContributionRepository::new(db);

        let total = repo.total_for(Uuid::new_v4()).await.unwrap();
        assert_eq!(total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_total_for_missing_aggregate_row_is_zero() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = ContributionRepository::new(db);

        let total = repo.total_for(Uuid::new_v4()).await.unwrap();
        assert_eq!(total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_record_then_total_reflects_the_new_sum() {
        let owner_id = Uuid::new_v4();
        let inserted = contributions::Model {
            id: Uuid::new_v4(),
            owner_id,
            amount: dec!(25_000),
            attachment_url: None,
            recorded_at: chrono::Utc::now().into(),
        };

        // One insert against a prior total of 50 000.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inserted.clone()]])
            .append_query_results([vec![sum_row(Some(dec!(75_000)))]])
            .into_connection();
        let repo = ContributionRepository::new(db);

        let row = repo.insert(owner_id, dec!(25_000), None).await.unwrap();
        assert_eq!(row.amount, dec!(25_000));
        assert_eq!(row.owner_id, owner_id);

        let total = repo.total_for(owner_id).await.unwrap();
        assert_eq!(total, dec!(75_000));
    }
}
