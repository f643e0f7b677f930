//! `SeaORM` Entity for the group_memberships table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group membership row: the many-to-many relation between
/// administrators (group owners) and members.
///
/// The composite primary key is the uniqueness invariant: at most one row
/// per (admin, member) pair, enforced by the store so concurrent joins
/// race safely.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "group_memberships")]
pub struct Model {
    /// Owning administrator.
    #[sea_orm(primary_key, auto_increment = false)]
    pub admin_id: Uuid,
    /// Member of the group.
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_id: Uuid,
    /// Join timestamp.
    pub joined_at: DateTimeWithTimeZone,
}

/// Membership relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning administrator.
    #[sea_orm(
        belongs_to = "super::administrators::Entity",
        from = "Column::AdminId",
        to = "super::administrators::Column::Id"
    )]
    Administrators,
    /// The member.
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id"
    )]
    Members,
}

impl Related<super::administrators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Administrators.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
