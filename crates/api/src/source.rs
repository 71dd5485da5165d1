//! The three list-service reads the navigation engine depends on.

use std::time::Instant;

use navlist_types::{FieldDescriptor, FieldKind, ListDescriptor, ROW_PAGE_LIMIT, RawRow};
use navlist_util::{
    BODY_PREVIEW_LIMIT, extract_collection_items, parse_response_json_strict, preview_body, redact_sensitive,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ListSourceError, SharePointClient, TransportError};

/// Characters escaped when a list id is placed inside `lists('...')`.
const LIST_ID_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>');

/// Source of backing lists, their columns and their rows.
#[async_trait::async_trait]
pub trait ListSource: Send + Sync {
    /// Visible lists of the site, ordered by title.
    async fn fetch_catalog(&self) -> Result<Vec<ListDescriptor>, ListSourceError>;

    /// Column definitions of `list_id`, in the order the service reports them.
    async fn fetch_fields(&self, list_id: &str) -> Result<Vec<FieldDescriptor>, ListSourceError>;

    /// Rows of `list_id` restricted to `select_fields`, ordered by id.
    ///
    /// Implementations may return more than [`ROW_PAGE_LIMIT`] rows; callers
    /// truncate.
    async fn fetch_rows(&self, list_id: &str, select_fields: &[String]) -> Result<Vec<RawRow>, ListSourceError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListRecord {
    id: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FieldRecord {
    internal_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    type_as_string: String,
}

#[async_trait::async_trait]
impl ListSource for SharePointClient {
    async fn fetch_catalog(&self) -> Result<Vec<ListDescriptor>, ListSourceError> {
        let query = [
            ("$filter", "Hidden eq false".to_string()),
            ("$select", "Id,Title".to_string()),
            ("$orderby", "Title".to_string()),
        ];
        let items = self
            .get_collection("/_api/web/lists", &query)
            .await
            .map_err(ListSourceError::Catalog)?;

        let records = decode_records::<ListRecord>(items, "list record").map_err(ListSourceError::Catalog)?;
        Ok(records
            .into_iter()
            .map(|record| ListDescriptor::new(record.id, record.title))
            .collect())
    }

    async fn fetch_fields(&self, list_id: &str) -> Result<Vec<FieldDescriptor>, ListSourceError> {
        let wrap = |source| ListSourceError::Fields {
            list_id: list_id.to_string(),
            source,
        };
        let query = [
            ("$filter", "Hidden eq false".to_string()),
            ("$select", "InternalName,Title,TypeAsString".to_string()),
        ];
        let path = format!("{}/fields", list_path(list_id));
        let items = self.get_collection(&path, &query).await.map_err(wrap)?;

        let records = decode_records::<FieldRecord>(items, "field record").map_err(wrap)?;
        Ok(records
            .into_iter()
            .map(|record| {
                FieldDescriptor::new(
                    record.internal_name,
                    record.title,
                    FieldKind::from_type_tag(&record.type_as_string),
                )
            })
            .collect())
    }

    async fn fetch_rows(&self, list_id: &str, select_fields: &[String]) -> Result<Vec<RawRow>, ListSourceError> {
        let query = [
            ("$select", select_fields.join(",")),
            ("$orderby", "ID".to_string()),
            ("$top", ROW_PAGE_LIMIT.to_string()),
        ];
        let path = format!("{}/items", list_path(list_id));
        let items = self
            .get_collection(&path, &query)
            .await
            .map_err(|source| ListSourceError::Rows {
                list_id: list_id.to_string(),
                source,
            })?;

        Ok(items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => RawRow::from(map),
                other => {
                    debug!(%list_id, item = %other, "list item is not an object; using an empty row");
                    RawRow::new()
                }
            })
            .collect())
    }
}

impl SharePointClient {
    /// GET a collection endpoint and return its items.
    async fn get_collection(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>, TransportError> {
        let start = Instant::now();
        debug!(path = %path, query_parameter_count = query.len(), "http request started");

        let response = self.request(Method::GET, path).query(query).send().await.map_err(|error| {
            warn!(path = %path, error = %error, "http request failed to send");
            TransportError::Network(error)
        })?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let body = redact_sensitive(&preview_body(&body_text, BODY_PREVIEW_LIMIT));
            warn!(
                path = %path,
                status = %status,
                body = %body,
                duration_ms = start.elapsed().as_millis(),
                "http request failed"
            );
            return Err(TransportError::Status { status, body });
        }

        let payload = parse_response_json_strict(&body_text, Some(status)).inspect_err(|error| {
            warn!(
                path = %path,
                status = %status,
                body_len = body_text.len(),
                error = %error,
                "http response JSON parse failed"
            );
        })?;

        let items = extract_collection_items(&payload).ok_or(TransportError::UnexpectedShape {
            expected: "a collection of items",
        })?;
        debug!(
            path = %path,
            status = %status,
            item_count = items.len(),
            duration_ms = start.elapsed().as_millis(),
            "http request completed"
        );
        Ok(items)
    }
}

/// Site-relative path of a list, quoting the id for an OData string literal.
fn list_path(list_id: &str) -> String {
    let quoted = list_id.trim().replace('\'', "''");
    format!("/_api/web/lists('{}')", utf8_percent_encode(&quoted, LIST_ID_ENCODE_SET))
}

fn decode_records<T: serde::de::DeserializeOwned>(
    items: Vec<Value>,
    record: &'static str,
) -> Result<Vec<T>, TransportError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|source| TransportError::Record { record, source }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_path_quotes_and_encodes_ids() {
        assert_eq!(
            list_path("6f1e2c1a-7d1b-4a43-9b58-2f0f0e0a1b2c"),
            "/_api/web/lists('6f1e2c1a-7d1b-4a43-9b58-2f0f0e0a1b2c')"
        );
        assert_eq!(list_path("o'brien list"), "/_api/web/lists('o''brien%20list')");
        assert_eq!(list_path("a/b?c"), "/_api/web/lists('a%2Fb%3Fc')");
    }

    #[test]
    fn decode_records_reports_the_record_kind() {
        let items = vec![serde_json::json!({ "Title": "No id" })];
        let error = decode_records::<ListRecord>(items, "list record").unwrap_err();
        assert!(error.to_string().starts_with("malformed list record"), "error: {error}");
    }
}
