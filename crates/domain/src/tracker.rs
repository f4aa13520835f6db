//! Request payloads for the issue tracker's projects, issues and comments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to another entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    /// Entity id.
    pub id: String,
}

impl IdRef {
    /// Creates a reference.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Fields of an issue create/update call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueFields {
    /// Issue type.
    #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IdRef>,
    /// Owning project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<IdRef>,
    /// One-line summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Body of `POST issue` and `PUT issue/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuePayload {
    /// Field values.
    pub fields: IssueFields,
    /// Update operations, always empty here.
    #[serde(default)]
    pub update: Map<String, Value>,
}

impl IssuePayload {
    /// Payload creating an issue of `issue_type_id` in `project_id`.
    #[must_use]
    pub fn create(
        project_id: impl Into<String>,
        issue_type_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            fields: IssueFields {
                issue_type: Some(IdRef::new(issue_type_id)),
                project: Some(IdRef::new(project_id)),
                summary: Some(summary.into()),
            },
            update: Map::new(),
        }
    }

    /// Payload changing only the summary.
    #[must_use]
    pub fn summary_update(summary: impl Into<String>) -> Self {
        Self {
            fields: IssueFields {
                summary: Some(summary.into()),
                ..IssueFields::default()
            },
            update: Map::new(),
        }
    }
}

/// Body of `POST project` and `PUT project/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    /// Short uppercase project key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account id of the project lead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_account_id: Option<String>,
    /// Project type, e.g. `business`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type_key: Option<String>,
    /// Free text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectPayload {
    /// Payload creating a business project.
    #[must_use]
    pub fn create(
        key: impl Into<String>,
        name: impl Into<String>,
        lead_account_id: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            name: Some(name.into()),
            lead_account_id: Some(lead_account_id.into()),
            project_type_key: Some("business".to_string()),
            description: None,
        }
    }

    /// Payload renaming a project and setting its description.
    #[must_use]
    pub fn rename(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Text node of a rich-text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    /// Node type (`doc`, `paragraph`, `text`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Text for `text` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DocNode>,
    /// Document format version, set only on the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// Body of `POST issue/{id}/comment` and `PUT issue/{id}/comment/{cid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    /// Comment as a rich-text document.
    pub body: DocNode,
}

impl CommentPayload {
    /// Comment made of a single paragraph of plain text.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        let text = DocNode {
            kind: "text".to_string(),
            text: Some(text.into()),
            content: Vec::new(),
            version: None,
        };
        let paragraph = DocNode {
            kind: "paragraph".to_string(),
            text: None,
            content: vec![text],
            version: None,
        };
        Self {
            body: DocNode {
                kind: "doc".to_string(),
                text: None,
                content: vec![paragraph],
                version: Some(1),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_issue_create_shape() {
        let payload = IssuePayload::create("10033", "10034", "Task Acme");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "fields": {
                    "issuetype": {"id": "10034"},
                    "project": {"id": "10033"},
                    "summary": "Task Acme"
                },
                "update": {}
            })
        );
    }

    #[test]
    fn test_issue_update_shape() {
        let payload = IssuePayload::summary_update("Updated Task issue");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"fields": {"summary": "Updated Task issue"}, "update": {}})
        );
    }

    #[test]
    fn test_project_create_shape() {
        let payload = ProjectPayload::create("AUSD", "Project 0123", "acc-1");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "key": "AUSD",
                "name": "Project 0123",
                "leadAccountId": "acc-1",
                "projectTypeKey": "business"
            })
        );
    }

    #[test]
    fn test_comment_shape() {
        let payload = CommentPayload::paragraph("Update comment test");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "body": {
                    "type": "doc",
                    "version": 1,
                    "content": [{
                        "type": "paragraph",
                        "content": [{"type": "text", "text": "Update comment test"}]
                    }]
                }
            })
        );
    }
}
