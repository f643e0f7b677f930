//! Initial database migration.
//!
//! Creates the two principal tables and the contribution, loan, and
//! group-membership tables, with the uniqueness constraints the
//! application relies on for race-free duplicate detection.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PRINCIPAL TABLES
        // ============================================================
        db.execute_unprepared(MEMBERS_SQL).await?;
        db.execute_unprepared(ADMINISTRATORS_SQL).await?;

        // ============================================================
        // PART 2: FINANCIAL LEDGERS
        // ============================================================
        db.execute_unprepared(CONTRIBUTIONS_SQL).await?;
        db.execute_unprepared(LOANS_SQL).await?;

        // ============================================================
        // PART 3: GROUP MEMBERSHIP
        // ============================================================
        db.execute_unprepared(GROUP_MEMBERSHIPS_SQL).await?;

        // ============================================================
        // PART 4: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const MEMBERS_SQL: &str = r"
CREATE TABLE members (
    id UUID PRIMARY KEY,
    display_name TEXT NOT NULL,
    phone_number VARCHAR(10) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'member',
    group_code TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    registered_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ADMINISTRATORS_SQL: &str = r"
CREATE TABLE administrators (
    id UUID PRIMARY KEY,
    display_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    code_group TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL DEFAULT 'admin'
        CHECK (role IN ('admin', 'superadmin')),
    registered_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

// owner_id references a member OR an administrator (administrators
// contribute in their own right), so no foreign key is possible here;
// owner existence is checked by the application at record time.
const CONTRIBUTIONS_SQL: &str = r"
CREATE TABLE contributions (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    attachment_url TEXT,
    recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const LOANS_SQL: &str = r"
CREATE TABLE loans (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    requested_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const GROUP_MEMBERSHIPS_SQL: &str = r"
CREATE TABLE group_memberships (
    admin_id UUID NOT NULL REFERENCES administrators(id) ON DELETE CASCADE,
    member_id UUID NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (admin_id, member_id)
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_contributions_owner ON contributions(owner_id, recorded_at DESC);
CREATE INDEX idx_loans_owner ON loans(owner_id, requested_at DESC);
CREATE INDEX idx_loans_status ON loans(status);
CREATE INDEX idx_group_memberships_member ON group_memberships(member_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS group_memberships;
DROP TABLE IF EXISTS loans;
DROP TABLE IF EXISTS contributions;
DROP TABLE IF EXISTS administrators;
DROP TABLE IF EXISTS members;
";
