//! Repository for the `contacts` table. Contacts are append-only.

use marketing_core::types::DbId;
use marketing_core::validation::NewContact;
use sqlx::PgConnection;

use crate::models::contact::Contact;

const COLUMNS: &str = "id, name, email, message, created_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Store a submission, returning its new ID.
    pub async fn create(conn: &mut PgConnection, input: &NewContact) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO contacts (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .fetch_one(conn)
        .await
    }

    /// List all submissions, newest first.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(conn).await
    }
}
