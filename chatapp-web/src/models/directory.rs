//! Shapes of the documents the pages read and write.
//!
//! * `users/{uid}`: `{ contacts: [ListEntry], groups: [ListEntry] }`
//! * `chats/{chatId}`: `{ messages: [ChatMessage] }`
//! * `groups/{groupId}`: [`GroupInfo`]
//! * `directory/public`: `{ groups: [ListEntry] }`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::BackendResult;
use shared::models::DocumentPath;

/// One row of a contact or group list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Label of the sender
    pub from: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Read an array field, skipping entries that do not parse.
pub fn array_field<T: for<'de> Deserialize<'de>>(document: Option<&Value>, field: &str) -> Vec<T> {
    document
        .and_then(|doc| doc.get(field))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Return `document` with `message` appended to its `messages` array,
/// creating the array when missing.
pub fn with_message(document: Option<Value>, message: &ChatMessage) -> Value {
    let mut document = match document {
        Some(Value::Object(map)) => Value::Object(map),
        _ => Value::Object(serde_json::Map::new()),
    };
    let entry = serde_json::to_value(message).unwrap_or(Value::Null);
    if let Some(map) = document.as_object_mut() {
        match map.get_mut("messages") {
            Some(Value::Array(messages)) => messages.push(entry),
            _ => {
                map.insert("messages".to_string(), Value::Array(vec![entry]));
            }
        }
    }
    document
}

pub fn user_path(uid: &str) -> BackendResult<DocumentPath> {
    DocumentPath::new("users", uid)
}

pub fn chat_path(chat_id: &str) -> BackendResult<DocumentPath> {
    DocumentPath::new("chats", chat_id)
}

pub fn group_path(group_id: &str) -> BackendResult<DocumentPath> {
    DocumentPath::new("groups", group_id)
}

pub fn public_directory_path() -> BackendResult<DocumentPath> {
    DocumentPath::new("directory", "public")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_field_skips_malformed_entries() {
        let doc = json!({
            "contacts": [
                {"id": "u-1", "name": "Ada"},
                {"name": "no id"},
                {"id": "u-2"}
            ]
        });
        let contacts: Vec<ListEntry> = array_field(Some(&doc), "contacts");
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[1].name, "");
    }

    #[test]
    fn test_array_field_of_missing_document_is_empty() {
        let groups: Vec<ListEntry> = array_field(None, "groups");
        assert!(groups.is_empty());
        let doc = json!({"groups": "not a list"});
        let groups: Vec<ListEntry> = array_field(Some(&doc), "groups");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_with_message_appends_and_keeps_other_fields() {
        let doc = json!({"name": "Team", "messages": [{"from": "a", "text": "one"}]});
        let message = ChatMessage {
            from: "b".to_string(),
            text: "two".to_string(),
        };
        let updated = with_message(Some(doc), &message);
        assert_eq!(updated["name"], "Team");
        let messages: Vec<ChatMessage> = array_field(Some(&updated), "messages");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], message);
    }

    #[test]
    fn test_with_message_starts_a_new_conversation() {
        let message = ChatMessage {
            from: "a".to_string(),
            text: "hello".to_string(),
        };
        let created = with_message(None, &message);
        assert_eq!(created, json!({"messages": [{"from": "a", "text": "hello"}]}));
    }

    #[test]
    fn test_paths_reject_slashes_in_ids() {
        assert!(chat_path("c-1").is_ok());
        assert!(chat_path("a/b").is_err());
        assert_eq!(group_path("g-1").unwrap().to_string(), "groups/g-1");
    }
}
