//! Principal model and the authorization gate.
//!
//! Every inbound request resolves to exactly one [`Principal`], which the
//! gate then checks against role and ownership rules.

pub mod gate;
pub mod principal;

pub use gate::{authorize_roles, check_ownership};
pub use principal::{AdminIdentity, MemberIdentity, Principal, Role};
