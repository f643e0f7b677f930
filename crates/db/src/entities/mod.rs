//! `SeaORM` entity definitions.

pub mod administrators;
pub mod contributions;
pub mod group_memberships;
pub mod loans;
pub mod members;
