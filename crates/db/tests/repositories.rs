//! Integration tests for the project and contact repositories.

use marketing_core::validation::{NewContact, NewProject};
use marketing_db::repositories::{ContactRepo, ProjectRepo};
use marketing_db::schema::initialize_schema;
use marketing_db::{DbPool, PoolConfig};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup(pool: PgPool) -> DbPool {
    let db = DbPool::from_pool(pool, &PoolConfig::default());
    initialize_schema(&db).await.unwrap();
    db
}

fn new_project(title: &str, image_url: Option<&str>) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: format!("{title} description"),
        image_url: image_url.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_create_then_find_round_trips(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let input = new_project("Branding", Some("https://example.com/b.png"));
    let created = ProjectRepo::create(&mut conn, &input).await.unwrap();

    let found = ProjectRepo::find_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .expect("created project should exist");
    assert_eq!(found.title, input.title);
    assert_eq!(found.description, input.description);
    assert_eq!(found.image_url, input.image_url);
    assert_eq!(found.created_at, created.created_at);
}

#[sqlx::test(migrations = false)]
async fn test_list_is_newest_first(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let created = ProjectRepo::create(&mut conn, &new_project("Newest", None))
        .await
        .unwrap();

    let projects = ProjectRepo::list(&mut conn).await.unwrap();
    assert_eq!(projects.len(), 5);
    assert_eq!(projects[0].id, created.id);

    // The seed rows share one transaction timestamp; id breaks the tie.
    let seed_titles: Vec<_> = projects[1..].iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        seed_titles,
        [
            "Social Marketing",
            "Content Marketing",
            "Email Marketing",
            "Search Engine Optimization",
        ]
    );
}

#[sqlx::test(migrations = false)]
async fn test_update_replaces_fields(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let input = new_project("Before", Some("https://a.example/x.png"));
    let created = ProjectRepo::create(&mut conn, &input).await.unwrap();

    let updated = ProjectRepo::update(&mut conn, created.id, &new_project("After", None))
        .await
        .unwrap()
        .expect("row should be updated");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "After");
    assert_eq!(updated.image_url, None);
    assert_eq!(updated.created_at, created.created_at);
}

#[sqlx::test(migrations = false)]
async fn test_update_missing_row_creates_nothing(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let result = ProjectRepo::update(&mut conn, 999_999, &new_project("Ghost", None))
        .await
        .unwrap();
    assert!(result.is_none());

    let projects = ProjectRepo::list(&mut conn).await.unwrap();
    assert_eq!(projects.len(), 4);
    assert!(projects.iter().all(|p| p.title != "Ghost"));
}

#[sqlx::test(migrations = false)]
async fn test_delete_reports_affected_rows(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let created = ProjectRepo::create(&mut conn, &new_project("Doomed", None))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&mut conn, created.id).await.unwrap());
    assert!(!ProjectRepo::delete(&mut conn, created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_contacts_are_stored_and_listed(pool: PgPool) {
    let db = setup(pool).await;
    let mut conn = db.acquire().await.unwrap();

    let first = ContactRepo::create(
        &mut conn,
        &NewContact {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "First".into(),
        },
    )
    .await
    .unwrap();
    let second = ContactRepo::create(
        &mut conn,
        &NewContact {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            message: "Second".into(),
        },
    )
    .await
    .unwrap();
    assert_ne!(first, second);

    let contacts = ContactRepo::list(&mut conn).await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id, second);
    assert_eq!(contacts[0].email, "grace@example.com");
    assert_eq!(contacts[1].name, "Ada");
}
