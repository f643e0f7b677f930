//! `SeaORM` Entity for the members table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member row. `group_code` is a denormalized copy of the joined
/// administrator's code; the authoritative relation lives in
/// `group_memberships`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Member ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Phone number (unique).
    #[sea_orm(unique)]
    pub phone_number: String,
    /// Argon2id PHC-format hash of the 4-digit PIN.
    pub password_hash: String,
    /// Stored role (always "member").
    pub role: String,
    /// Joined group code, if any.
    pub group_code: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Registration timestamp.
    pub registered_at: DateTimeWithTimeZone,
}

/// Member relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Group memberships this member participates in.
    #[sea_orm(has_many = "super::group_memberships::Entity")]
    GroupMemberships,
}

impl Related<super::group_memberships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMemberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
