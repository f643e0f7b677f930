//! Loan repository for database operations.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use simpanan_core::underwriting::LoanStatus;
use simpanan_shared::types::PageRequest;

use crate::entities::loans;

/// Aggregate loan sums per lifecycle state, for administrator summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoanStatusTotals {
    /// Sum of pending loan amounts.
    pub pending: Decimal,
    /// Sum of approved loan amounts.
    pub approved: Decimal,
    /// Sum of rejected loan amounts.
    pub rejected: Decimal,
}

/// Loan repository for CRUD and aggregate operations.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    db: DatabaseConnection,
}

impl LoanRepository {
    /// Creates a new loan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a loan in the `pending` state. Underwriting has already
    /// passed by the time this runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, owner_id: Uuid, amount: Decimal) -> Result<loans::Model, DbErr> {
        let row = loans::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            amount: Set(amount),
            status: Set(LoanStatus::Pending.as_str().to_string()),
            requested_at: Set(chrono::Utc::now().into()),
        };

        row.insert(&self.db).await
    }

    /// Finds a loan by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<loans::Model>, DbErr> {
        loans::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists an owner's loans, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, owner_id: Uuid) -> Result<Vec<loans::Model>, DbErr> {
        loans::Entity::find()
            .filter(loans::Column::OwnerId.eq(owner_id))
            .order_by_desc(loans::Column::RequestedAt)
            .all(&self.db)
            .await
    }

    /// Lists all loans, newest first, offset-paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self, page: &PageRequest) -> Result<(Vec<loans::Model>, u64), DbErr> {
        let paginator = loans::Entity::find()
            .order_by_desc(loans::Column::RequestedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Writes a new lifecycle state. The transition has already been
    /// validated against the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: LoanStatus,
    ) -> Result<Option<loans::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: loans::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map(Some)
    }

    /// Deletes a loan. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = loans::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Aggregate loan sums grouped by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn totals_by_status(&self) -> Result<LoanStatusTotals, DbErr> {
        let rows: Vec<(String, Option<Decimal>)> = loans::Entity::find()
            .select_only()
            .column(loans::Column::Status)
            .column_as(Expr::col(loans::Column::Amount).sum(), "total")
            .group_by(loans::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut totals = LoanStatusTotals::default();
        for (status, sum) in rows {
            let sum = sum.unwrap_or(Decimal::ZERO);
            match LoanStatus::parse(&status) {
                Some(LoanStatus::Pending) => totals.pending = sum,
                Some(LoanStatus::Approved) => totals.approved = sum,
                Some(LoanStatus::Rejected) => totals.rejected = sum,
                // Unknown status strings cannot be inserted through this
                // repository; ignore rather than fail the summary.
                None => {}
            }
        }

        Ok(totals)
    }
}
