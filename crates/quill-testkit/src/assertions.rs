//! Assertion helpers for cross-checking API responses against storage.

use chrono::{DateTime, Utc};
use serde_json::Value;

use quill_core::domain::BlogPost;

/// The exact field set every API post object must expose, sorted.
pub const POST_FIELDS: [&str; 5] = ["author", "content", "created", "id", "title"];

/// Assert a JSON value is a post object exposing exactly [`POST_FIELDS`].
pub fn assert_post_shape(value: &Value) {
    let obj = value
        .as_object()
        .unwrap_or_else(|| panic!("expected a JSON object, got {value}"));

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, POST_FIELDS, "unexpected post field set");
}

/// Read the `created` field as a timestamp value, independent of its raw
/// encoding.
pub fn normalized_created(value: &Value) -> DateTime<Utc> {
    let raw = value["created"]
        .as_str()
        .unwrap_or_else(|| panic!("created must be a string, got {}", value["created"]));

    raw.parse()
        .unwrap_or_else(|e| panic!("created must be an RFC 3339 timestamp: {e}"))
}

/// Field-for-field comparison between an API post object and the record
/// fetched directly from storage. The author is reconciled between the
/// display-string and structured forms; `created` is compared by value.
pub fn assert_matches_stored(api: &Value, stored: &BlogPost) {
    assert_eq!(api["id"].as_str(), Some(stored.id.to_string().as_str()));
    assert_eq!(api["author"].as_str(), Some(stored.author.display().as_str()));
    assert_eq!(api["content"].as_str(), Some(stored.content.as_str()));
    assert_eq!(api["title"].as_str(), Some(stored.title.as_str()));
    assert_eq!(normalized_created(api), stored.created);
}
