use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u32,
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub count: u32,
    pub value: Vec<CommentThread>,
}

/// A positioned comment conversation on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: u32,
    /// Absent for threads not anchored to a file (status updates, votes,
    /// general PR discussion).
    #[serde(default)]
    pub thread_context: Option<CommentThreadContext>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadContext {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub left_file_start: Option<CommentPosition>,
    #[serde(default)]
    pub left_file_end: Option<CommentPosition>,
    #[serde(default)]
    pub right_file_start: Option<CommentPosition>,
    #[serde(default)]
    pub right_file_end: Option<CommentPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPosition {
    pub line: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub author: IdentityRef,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub comment_type: Option<CommentType>,
}

impl Comment {
    /// System comments are generated by Azure DevOps itself (policy updates,
    /// pushes, votes) rather than written by a reviewer.
    pub fn is_system(&self) -> bool {
        self.comment_type == Some(CommentType::System)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentType {
    Text,
    System,
    CodeChange,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRef {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "uniqueName", default)]
    pub unique_name: Option<String>,
}
