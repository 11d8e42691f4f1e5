use entries_dal::{
    Error,
    entry::{CreateEntry, EntryRepository, EntryRepositoryImpl},
};
use sqlx::Row as _;

async fn init_db() -> entries_dal::Pool {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    entries_dal::migrate(&conn).await.unwrap();
    conn
}

async fn count_rows(conn: &entries_dal::Pool) -> i64 {
    sqlx::query("SELECT count(*) AS cnt FROM demo_entries")
        .fetch_one(conn)
        .await
        .unwrap()
        .get("cnt")
}

#[tokio::test]
async fn test_create_and_list() {
    let conn = init_db().await;
    let repo: EntryRepository = EntryRepositoryImpl::new(conn);

    let first = repo
        .create(CreateEntry::new("Hello", Some("World".to_string())))
        .await
        .unwrap();
    assert_eq!(first.title, "Hello");
    assert_eq!(first.description.as_deref(), Some("World"));

    let entries = repo.list().await.unwrap();
    assert_eq!(entries, vec![first.clone()]);

    let second = repo.create(CreateEntry::new("Second", None)).await.unwrap();
    assert!(second.id > first.id);
    assert!(second.created_at >= first.created_at);

    let entries = repo.list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, second.id);
    assert_eq!(entries[1].id, first.id);
}

#[tokio::test]
async fn test_list_ordered_by_created_at() {
    let conn = init_db().await;
    sqlx::query(
        "INSERT INTO demo_entries (title, created_at) VALUES \
         ('old', '2024-01-01T00:00:00.000Z'), \
         ('newest', '2026-01-01T00:00:00.000Z'), \
         ('middle', '2025-01-01T00:00:00.000Z')",
    )
    .execute(&conn)
    .await
    .unwrap();

    let repo = EntryRepositoryImpl::new(conn);
    let titles: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["newest", "middle", "old"]);
}

#[tokio::test]
async fn test_blank_title_rejected() {
    let conn = init_db().await;
    let repo = EntryRepositoryImpl::new(conn.clone());

    for title in ["", "   ", "\t\n"] {
        let res = repo.create(CreateEntry::new(title, Some("x".into()))).await;
        assert!(matches!(res, Err(Error::ValidationError(_))));
    }
    let res = repo.create(CreateEntry::new("a".repeat(256), None)).await;
    assert!(matches!(res, Err(Error::ValidationError(_))));
    assert_eq!(count_rows(&conn).await, 0);

    // storage refuses blank titles too
    let res = sqlx::query("INSERT INTO demo_entries (title) VALUES ('  ')")
        .execute(&conn)
        .await;
    assert!(res.is_err());
    assert_eq!(count_rows(&conn).await, 0);
}

#[tokio::test]
async fn test_description_absent_vs_empty() {
    let conn = init_db().await;
    let repo = EntryRepositoryImpl::new(conn);

    let absent = repo.create(CreateEntry::new("absent", None)).await.unwrap();
    let empty = repo
        .create(CreateEntry::new("empty", Some(String::new())))
        .await
        .unwrap();

    assert_eq!(repo.get(absent.id).await.unwrap().unwrap().description, None);
    assert_eq!(
        repo.get(empty.id).await.unwrap().unwrap().description,
        Some(String::new())
    );
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let conn = init_db().await;
    let repo = EntryRepositoryImpl::new(conn);

    let keep = repo.create(CreateEntry::new("keep", None)).await.unwrap();
    let entry = repo.create(CreateEntry::new("Hello", None)).await.unwrap();

    assert!(repo.delete(entry.id).await.unwrap());
    assert!(repo.get(entry.id).await.unwrap().is_none());
    assert!(!repo.delete(entry.id).await.unwrap());

    let entries = repo.list().await.unwrap();
    assert_eq!(entries, vec![keep]);
}

#[tokio::test]
async fn test_ids_not_reused() {
    let conn = init_db().await;
    let repo = EntryRepositoryImpl::new(conn);

    let entry = repo.create(CreateEntry::new("one", None)).await.unwrap();
    repo.delete(entry.id).await.unwrap();
    let next = repo.create(CreateEntry::new("two", None)).await.unwrap();
    assert!(next.id > entry.id);
}
