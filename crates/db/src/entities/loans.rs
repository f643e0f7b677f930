//! `SeaORM` Entity for the loans table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan row.
///
/// `status` holds one of pending/approved/rejected; the state machine is
/// enforced in `simpanan_core::underwriting` before any status write.
/// `owner_id` follows the same dual-kind convention as contributions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    /// Loan ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning principal (member or administrator).
    pub owner_id: Uuid,
    /// Requested amount (positive).
    pub amount: Decimal,
    /// Lifecycle state: "pending", "approved", or "rejected".
    pub status: String,
    /// Request timestamp.
    pub requested_at: DateTimeWithTimeZone,
}

/// No relations: the dual-kind owner precludes a single foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
