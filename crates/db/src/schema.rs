//! Table bootstrap and seed data.
//!
//! Every step is idempotent, so the initializer can run on each startup.

use sqlx::Connection;

use crate::pool::DbPool;

const CREATE_PROJECTS: &str = "
    CREATE TABLE IF NOT EXISTS projects (
        id          BIGSERIAL PRIMARY KEY,
        title       VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        image_url   TEXT,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const CREATE_CONTACTS: &str = "
    CREATE TABLE IF NOT EXISTS contacts (
        id         BIGSERIAL PRIMARY KEY,
        name       VARCHAR(255) NOT NULL,
        email      VARCHAR(255) NOT NULL,
        message    TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const SEED_DESCRIPTION: &str =
    "We help brands stand out through aweful, elegant visual design. Our design mainly philosophy.";

/// A fixed project row inserted into an empty `projects` table.
#[derive(Debug, Clone, Copy)]
pub struct SeedProject {
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

/// Seed rows, in insertion order.
pub const SEED_PROJECTS: [SeedProject; 4] = [
    SeedProject {
        title: "Search Engine Optimization",
        description: SEED_DESCRIPTION,
        image_url: "https://i.ibb.co.com/Fm7Jft5/john-schnobrich-Fl-Pc9-Voc-J4-unsplash.jpg",
    },
    SeedProject {
        title: "Email Marketing",
        description: SEED_DESCRIPTION,
        image_url: "https://i.ibb.co.com/fY9ttMn/tim-van-der-kuip-CPs2-X8-JYm-S8-unsplash.jpg",
    },
    SeedProject {
        title: "Content Marketing",
        description: SEED_DESCRIPTION,
        image_url: "https://i.ibb.co.com/7tg45JK/charlesdeluvio-Lks7vei-e-Ag-unsplash.jpg",
    },
    SeedProject {
        title: "Social Marketing",
        description: SEED_DESCRIPTION,
        image_url: "https://i.ibb.co.com/KV3VXfg/redd-f-5-U-28ojjgms-unsplash.jpg",
    },
];

/// Create both tables if absent and seed `projects` when it is empty.
///
/// Returns the number of seed rows inserted (`0` when the table already had
/// data). The emptiness check and the inserts share one transaction.
pub async fn initialize_schema(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query(CREATE_PROJECTS).execute(&mut *conn).await?;
    sqlx::query(CREATE_CONTACTS).execute(&mut *conn).await?;
    tracing::debug!("Tables ensured");

    let mut tx = conn.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Projects already present, skipping seed");
        return Ok(0);
    }

    let mut seeded = 0;
    for seed in &SEED_PROJECTS {
        sqlx::query("INSERT INTO projects (title, description, image_url) VALUES ($1, $2, $3)")
            .bind(seed.title)
            .bind(seed.description)
            .bind(seed.image_url)
            .execute(&mut *tx)
            .await?;
        seeded += 1;
    }
    tx.commit().await?;

    tracing::info!(seeded, "Seeded projects table");
    Ok(seeded)
}
