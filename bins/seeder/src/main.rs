//! Database seeder for Simpanan development and testing.
//!
//! Seeds a bootstrap superadmin, a regular group administrator, and a
//! handful of members with sample contributions so a fresh database is
//! usable from the mobile client right away.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use simpanan_core::auth::hash_password;
use simpanan_db::AdministratorRepository;
use simpanan_db::entities::{administrators, contributions, group_memberships, members};

/// Bootstrap superadmin ID (consistent for all seeds)
const SUPERADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test group administrator ID (consistent for all seeds)
const ADMIN_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Test member IDs (consistent for all seeds)
const MEMBER_IDS: [&str; 2] = [
    "00000000-0000-0000-0000-000000000010",
    "00000000-0000-0000-0000-000000000011",
];

/// Development PIN for every seeded account.
const DEV_PIN: &str = "1234";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = simpanan_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let pin_hash = hash_password(DEV_PIN).expect("Failed to hash development PIN");

    println!("Seeding superadmin...");
    seed_superadmin(&db, &pin_hash).await;

    println!("Seeding group administrator...");
    seed_group_admin(&db, &pin_hash).await;

    println!("Seeding members...");
    seed_members(&db, &pin_hash).await;

    println!("Seeding contributions...");
    seed_contributions(&db).await;

    println!("Seeding complete!");
}

fn superadmin_id() -> Uuid {
    Uuid::parse_str(SUPERADMIN_ID).unwrap()
}

fn admin_id() -> Uuid {
    Uuid::parse_str(ADMIN_ID).unwrap()
}

fn member_ids() -> Vec<Uuid> {
    MEMBER_IDS
        .iter()
        .map(|id| Uuid::parse_str(id).unwrap())
        .collect()
}

/// Seeds the bootstrap superadmin, but only into an empty store.
async fn seed_superadmin(db: &DatabaseConnection, pin_hash: &str) {
    let repo = AdministratorRepository::new(db.clone());
    match repo.count().await {
        Ok(0) => {}
        Ok(_) => {
            println!("  Administrators already exist, skipping bootstrap...");
            return;
        }
        Err(e) => {
            eprintln!("Failed to count administrators: {e}");
            return;
        }
    }

    let superadmin = administrators::ActiveModel {
        id: Set(superadmin_id()),
        display_name: Set("Super Admin".to_string()),
        email: Set("super@simpanan.dev".to_string()),
        password_hash: Set(pin_hash.to_string()),
        code_group: Set("PUSAT01".to_string()),
        role: Set("superadmin".to_string()),
        registered_at: Set(Utc::now().into()),
    };

    if let Err(e) = superadmin.insert(db).await {
        eprintln!("Failed to insert superadmin: {e}");
    } else {
        println!("  Created superadmin: super@simpanan.dev (PIN {DEV_PIN})");
    }
}

/// Seeds a regular group administrator for development.
async fn seed_group_admin(db: &DatabaseConnection, pin_hash: &str) {
    if administrators::Entity::find_by_id(admin_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Group administrator already exists, skipping...");
        return;
    }

    let admin = administrators::ActiveModel {
        id: Set(admin_id()),
        display_name: Set("Ketua Kelompok".to_string()),
        email: Set("admin@simpanan.dev".to_string()),
        password_hash: Set(pin_hash.to_string()),
        code_group: Set("MELATI01".to_string()),
        role: Set("admin".to_string()),
        registered_at: Set(Utc::now().into()),
    };

    if let Err(e) = admin.insert(db).await {
        eprintln!("Failed to insert group administrator: {e}");
    } else {
        println!("  Created group administrator: admin@simpanan.dev (code MELATI01)");
    }
}

/// Seeds two members and enrolls them in the test group.
async fn seed_members(db: &DatabaseConnection, pin_hash: &str) {
    let names = ["Siti Rahayu", "Budi Santoso"];
    let phones = ["0811111111", "0822222222"];

    for (i, id) in member_ids().into_iter().enumerate() {
        if members::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Member {} already exists, skipping...", names[i]);
            continue;
        }

        let member = members::ActiveModel {
            id: Set(id),
            display_name: Set(names[i].to_string()),
            phone_number: Set(phones[i].to_string()),
            password_hash: Set(pin_hash.to_string()),
            role: Set("member".to_string()),
            group_code: Set(Some("MELATI01".to_string())),
            is_active: Set(true),
            registered_at: Set(Utc::now().into()),
        };

        if let Err(e) = member.insert(db).await {
            eprintln!("Failed to insert member {}: {e}", names[i]);
            continue;
        }

        let membership = group_memberships::ActiveModel {
            admin_id: Set(admin_id()),
            member_id: Set(id),
            joined_at: Set(Utc::now().into()),
        };

        if let Err(e) = membership.insert(db).await {
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to enroll member {}: {e}", names[i]);
            }
        } else {
            println!("  Created member {} ({}, PIN {DEV_PIN})", names[i], phones[i]);
        }
    }
}

/// Seeds sample contributions so totals and loan evaluation have data.
async fn seed_contributions(db: &DatabaseConnection) {
    let amounts = [
        Decimal::from(150_000),
        Decimal::from(75_000),
        Decimal::from(200_000),
    ];

    let ids = member_ids();
    let mut inserted = 0;

    for (i, amount) in amounts.iter().enumerate() {
        let owner = ids[i % ids.len()];
        let contribution = contributions::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner),
            amount: Set(*amount),
            attachment_url: Set(None),
            recorded_at: Set(Utc::now().into()),
        };

        if let Err(e) = contribution.insert(db).await {
            eprintln!("Failed to insert contribution: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} contributions");
}
