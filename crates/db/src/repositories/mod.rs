//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each repository owns a cloned connection handle; the
//! pool itself is constructed once at startup.

pub mod administrator;
pub mod contribution;
pub mod group_membership;
pub mod loan;
pub mod member;

pub use administrator::AdministratorRepository;
pub use contribution::ContributionRepository;
pub use group_membership::GroupMembershipRepository;
pub use loan::{LoanRepository, LoanStatusTotals};
pub use member::MemberRepository;
