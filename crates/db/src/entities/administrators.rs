//! `SeaORM` Entity for the administrators table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Administrator row. `code_group` is the shareable join key members use
/// to enter this administrator's group.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "administrators")]
pub struct Model {
    /// Administrator ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Email (unique).
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC-format hash of the 4-digit PIN.
    pub password_hash: String,
    /// Shareable group join code (unique).
    #[sea_orm(unique)]
    pub code_group: String,
    /// Stored role: "admin" or "superadmin".
    pub role: String,
    /// Registration timestamp.
    pub registered_at: DateTimeWithTimeZone,
}

/// Administrator relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Memberships of this administrator's group.
    #[sea_orm(has_many = "super::group_memberships::Entity")]
    GroupMemberships,
}

impl Related<super::group_memberships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMemberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
