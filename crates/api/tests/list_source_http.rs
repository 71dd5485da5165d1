use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use navlist_api::{ListSource, ListSourceError, SharePointClient, TransportError};
use navlist_types::{FieldKind, RawValue};
use serde_json::json;

const SITE_PREFIX: &str = "/sites/intranet";

async fn site_handler(uri: Uri, Query(query): Query<HashMap<String, String>>) -> Response {
    let path = uri.path().strip_prefix(SITE_PREFIX).unwrap_or_default();
    match path {
        "/_api/web/lists" => {
            if query.get("$filter").map(String::as_str) != Some("Hidden eq false")
                || query.get("$orderby").map(String::as_str) != Some("Title")
            {
                return (StatusCode::BAD_REQUEST, "unexpected catalog query").into_response();
            }
            Json(json!({
                "value": [
                    { "Id": "list-1", "Title": "Quick Links" },
                    { "Id": "list-2", "Title": "Team Sites" }
                ]
            }))
            .into_response()
        }
        "/_api/web/lists('list-1')/fields" => Json(json!({
            "d": { "results": [
                { "InternalName": "Title", "Title": "Title", "TypeAsString": "Text" },
                { "InternalName": "Link", "Title": "Link", "TypeAsString": "URL" },
                { "InternalName": "Section", "Title": "Section", "TypeAsString": "Choice" }
            ] }
        }))
        .into_response(),
        "/_api/web/lists('list-1')/items" => {
            if query.get("$top").map(String::as_str) != Some("500")
                || query.get("$select").map(String::as_str) != Some("Id,Title,Link")
            {
                return (StatusCode::BAD_REQUEST, "unexpected item query").into_response();
            }
            Json(json!({
                "value": [
                    { "Id": 1, "Title": "Home", "Link": { "Url": "https://intranet.example.com", "Description": "Home" } },
                    { "Id": 2, "Title": "Docs", "Link": "/sites/intranet/docs" },
                    7
                ]
            }))
            .into_response()
        }
        "/_api/web/lists('locked')/items" => (
            StatusCode::FORBIDDEN,
            r#"{"error":"denied","access_token":"leaked-value"}"#,
        )
            .into_response(),
        "/_api/web/lists('broken')/fields" => (StatusCode::OK, "<html>sign in</html>").into_response(),
        "/_api/web/lists('odd')/fields" => Json(json!({ "error": "not a collection" })).into_response(),
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

async fn spawn_site() -> SharePointClient {
    let router = Router::new().fallback(site_handler);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let address = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    SharePointClient::new(&format!("http://{address}{SITE_PREFIX}/"), Some("test-token")).expect("client")
}

#[tokio::test]
async fn fetches_catalog_in_service_order() {
    let client = spawn_site().await;
    let lists = client.fetch_catalog().await.expect("catalog");
    let titles: Vec<_> = lists.iter().map(|list| list.title.as_str()).collect();
    assert_eq!(titles, vec!["Quick Links", "Team Sites"]);
    assert_eq!(lists[0].id, "list-1");
}

#[tokio::test]
async fn fetches_fields_from_verbose_payload() {
    let client = spawn_site().await;
    let fields = client.fetch_fields("list-1").await.expect("fields");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1].internal_name, "Link");
    assert_eq!(fields[1].kind, FieldKind::Url);
    assert_eq!(fields[2].kind, FieldKind::Other);
}

#[tokio::test]
async fn fetches_rows_with_selected_columns_and_keeps_every_item() {
    let client = spawn_site().await;
    let select = vec!["Id".to_string(), "Title".to_string(), "Link".to_string()];
    let rows = client.fetch_rows("list-1", &select).await.expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].value("Link"), RawValue::Text("/sites/intranet/docs".into()));
    assert!(matches!(rows[0].value("Link"), RawValue::Link { .. }));
    assert!(rows[2].is_empty());
}

#[tokio::test]
async fn forbidden_rows_surface_as_row_errors_with_redacted_body() {
    let client = spawn_site().await;
    let error = client.fetch_rows("locked", &["Id".to_string()]).await.unwrap_err();

    let ListSourceError::Rows { list_id, source } = &error else {
        panic!("expected a row error, got {error:?}");
    };
    assert_eq!(list_id, "locked");
    let TransportError::Status { status, body } = source else {
        panic!("expected a status error, got {source:?}");
    };
    assert_eq!(*status, reqwest::StatusCode::FORBIDDEN);
    assert!(!body.contains("leaked-value"), "body: {body}");
    assert!(error.user_message().contains("Hint"));
}

#[tokio::test]
async fn non_json_bodies_are_decode_errors() {
    let client = spawn_site().await;
    let error = client.fetch_fields("broken").await.unwrap_err();
    assert!(matches!(error.transport(), TransportError::Decode(_)), "error: {error:?}");
    assert!(error.to_string().starts_with("Failed to load fields for list 'broken'"));
}

#[tokio::test]
async fn payloads_without_items_are_shape_errors() {
    let client = spawn_site().await;
    let error = client.fetch_fields("odd").await.unwrap_err();
    assert!(matches!(error.transport(), TransportError::UnexpectedShape { .. }));
}

#[tokio::test]
async fn unknown_lists_report_not_found() {
    let client = spawn_site().await;
    let error = client.fetch_fields("missing").await.unwrap_err();
    assert_eq!(error.transport().status(), Some(reqwest::StatusCode::NOT_FOUND));
}
