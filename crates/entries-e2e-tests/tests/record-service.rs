use entries_client::{ClientError, EntriesApi as _, EntriesView, RecordClient, SubmitOutcome};
use entries_dal::entry::{CreateEntry, Entry};
use entries_e2e_tests::{entries_url, launch_env};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_entry_lifecycle() {
    let (base_url, _server) = launch_env("test_entry_lifecycle").await.unwrap();
    let client = RecordClient::new(entries_url(&base_url));

    assert!(client.list().await.unwrap().is_empty());

    let created = client
        .create(&CreateEntry::new("Hello", Some("World".to_string())))
        .await
        .unwrap();
    info!("Created: {created:?}");

    let entries = client.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, created.id);
    assert_eq!(entries[0].title, "Hello");
    assert_eq!(entries[0].description.as_deref(), Some("World"));
    assert_eq!(entries[0].created_at, created.created_at);

    let res = client
        .create(&CreateEntry::new("", Some("x".to_string())))
        .await;
    match res {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.starts_with("Invalid entry"));
        }
        other => panic!("Blank title accepted: {other:?}"),
    }
    assert_eq!(client.list().await.unwrap(), entries);

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_ordering_and_ids() {
    let (base_url, _server) = launch_env("test_ordering_and_ids").await.unwrap();
    let client = RecordClient::new(entries_url(&base_url));

    let mut created: Vec<Entry> = Vec::new();
    for title in ["first", "second", "third"] {
        let entry = client.create(&CreateEntry::new(title, None)).await.unwrap();
        if let Some(last) = created.last() {
            assert!(entry.id > last.id);
        }
        created.push(entry);
    }

    let listed = client.list().await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert!(
        listed
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
    assert!(listed.iter().all(|e| e.description.is_none()));
}

#[tokio::test]
#[traced_test]
async fn test_http_surface() {
    let (base_url, _server) = launch_env("test_http_surface").await.unwrap();
    let api_url = entries_url(&base_url);
    let client = reqwest::Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, api_url.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let headers = response.headers().clone();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,POST,DELETE,OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "content-type");
    assert_eq!(headers["access-control-max-age"], "86400");
    assert!(response.text().await.unwrap().is_empty());

    let response = client
        .post(api_url.clone())
        .json(&json!({"title": "Raw", "description": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["description"], "");

    let response = client.get(api_url.clone()).send().await.unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);

    let response = client.delete(api_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "ID is required"}));

    let mut bad_id = api_url.clone();
    bad_id.set_query(Some("id=abc"));
    let response = client.delete(bad_id).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let mut twice = api_url.clone();
    twice.set_query(Some("id=1&id=2"));
    let response = client.delete(twice).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = client.put(api_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 405);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
#[traced_test]
async fn test_view_against_server() {
    let (base_url, _server) = launch_env("test_view_against_server").await.unwrap();
    let view = EntriesView::new(RecordClient::new(entries_url(&base_url)));

    assert!(view.mount().await);
    assert!(view.entries().is_empty());

    view.set_title("Hello");
    view.set_description("World");
    assert!(matches!(view.submit().await, SubmitOutcome::Created(_)));
    assert_eq!(view.entries().len(), 1);
    assert_eq!(view.title(), "");

    view.set_title(" ");
    assert_eq!(view.submit().await, SubmitOutcome::Rejected);

    let id = view.entries()[0].id;
    assert!(view.delete(id).await);
    assert!(view.entries().is_empty());

    let errors = view
        .take_notices()
        .into_iter()
        .filter(|n| n.is_error())
        .count();
    assert_eq!(errors, 1);
}

#[tokio::test]
#[traced_test]
async fn test_view_server_down() {
    let (base_url, server) = launch_env("test_view_server_down").await.unwrap();
    drop(server);
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let view = EntriesView::new(RecordClient::new(entries_url(&base_url)));
    assert!(!view.mount().await);
    assert!(view.entries().is_empty());

    view.set_title("Hello");
    assert_eq!(view.submit().await, SubmitOutcome::Failed);
    assert_eq!(view.title(), "Hello");
    assert!(view.take_notices().iter().all(|n| n.is_error()));
}
