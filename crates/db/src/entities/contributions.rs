//! `SeaORM` Entity for the contributions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contribution row.
///
/// `owner_id` may reference either a member or an administrator
/// (administrators contribute in their own right), so it carries no
/// foreign key; owner existence is checked at record time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    /// Contribution ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning principal (member or administrator).
    pub owner_id: Uuid,
    /// Contributed amount (positive).
    pub amount: Decimal,
    /// Opaque reference to an externally stored receipt, if any.
    pub attachment_url: Option<String>,
    /// Recording timestamp.
    pub recorded_at: DateTimeWithTimeZone,
}

/// No relations: the dual-kind owner precludes a single foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
