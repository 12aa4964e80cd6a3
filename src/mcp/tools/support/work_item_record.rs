use crate::azure::models::WorkItem;
use crate::mcp::tools::support::html_to_text::{html_to_text, looks_like_html};
use serde_json::Value;
use std::fmt;

pub const UNASSIGNED: &str = "Unassigned";
pub const NO_DESCRIPTION: &str = "No description available";

/// Placeholder rendered for optional attributes the work item does not carry
const NOT_AVAILABLE: &str = "N/A";

/// Display attributes a [`WorkItemRecord`] can carry besides its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkItemAttribute {
    Kind,
    Title,
    AssignedTo,
    Description,
}

/// One row of the normalization table: where an attribute comes from, how it
/// is extracted and what it falls back to.
pub struct FieldMapping {
    pub attribute: WorkItemAttribute,
    /// Vendor field reference name
    pub field: &'static str,
    pub extract: fn(&Value) -> Option<String>,
    pub default: Option<&'static str>,
}

pub static FIELD_MAPPINGS: [FieldMapping; 4] = [
    FieldMapping {
        attribute: WorkItemAttribute::Kind,
        field: "System.WorkItemType",
        extract: extract_text,
        default: None,
    },
    FieldMapping {
        attribute: WorkItemAttribute::Title,
        field: "System.Title",
        extract: extract_text,
        default: None,
    },
    FieldMapping {
        attribute: WorkItemAttribute::AssignedTo,
        field: "System.AssignedTo",
        extract: extract_display_name,
        default: Some(UNASSIGNED),
    },
    FieldMapping {
        attribute: WorkItemAttribute::Description,
        field: "System.Description",
        extract: extract_rich_text,
        default: Some(NO_DESCRIPTION),
    },
];

fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Identity fields are objects; only their display name is shown. A missing
/// `displayName` counts as a missing field so the single default applies.
fn extract_display_name(value: &Value) -> Option<String> {
    value
        .get("displayName")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn extract_rich_text(value: &Value) -> Option<String> {
    let text = extract_text(value)?;
    if looks_like_html(&text) {
        return Some(html_to_text(&text).unwrap_or(text));
    }
    Some(text)
}

/// Which attributes the normalizer materializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemFieldSet {
    attributes: Vec<WorkItemAttribute>,
}

impl WorkItemFieldSet {
    /// Type, title, assignee and description
    pub fn full() -> Self {
        Self {
            attributes: FIELD_MAPPINGS.iter().map(|m| m.attribute).collect(),
        }
    }

    /// Everything but the work item type
    pub fn without_kind() -> Self {
        Self {
            attributes: FIELD_MAPPINGS
                .iter()
                .map(|m| m.attribute)
                .filter(|a| *a != WorkItemAttribute::Kind)
                .collect(),
        }
    }

    pub fn includes(&self, attribute: WorkItemAttribute) -> bool {
        self.attributes.contains(&attribute)
    }
}

impl Default for WorkItemFieldSet {
    fn default() -> Self {
        Self::full()
    }
}

/// Display-ready projection of a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemRecord {
    pub id: u32,
    /// `None` when the type is absent or excluded by the field set
    pub kind: Option<String>,
    pub title: Option<String>,
    pub assigned_to: String,
    pub description: String,
    show_kind: bool,
}

impl WorkItemRecord {
    pub fn from_rest(work_item: &WorkItem, field_set: &WorkItemFieldSet) -> Self {
        let lookup = |attribute: WorkItemAttribute| -> Option<String> {
            if !field_set.includes(attribute) {
                return None;
            }
            let mapping = FIELD_MAPPINGS.iter().find(|m| m.attribute == attribute)?;
            work_item
                .fields
                .get(mapping.field)
                .and_then(mapping.extract)
                .or_else(|| mapping.default.map(str::to_string))
        };

        Self {
            id: work_item.id,
            kind: lookup(WorkItemAttribute::Kind),
            title: lookup(WorkItemAttribute::Title),
            assigned_to: lookup(WorkItemAttribute::AssignedTo)
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            description: lookup(WorkItemAttribute::Description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            show_kind: field_set.includes(WorkItemAttribute::Kind),
        }
    }
}

impl fmt::Display for WorkItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Work item #{}", self.id)?;
        if self.show_kind {
            writeln!(f, "Type: {}", self.kind.as_deref().unwrap_or(NOT_AVAILABLE))?;
        }
        writeln!(f, "Title: {}", self.title.as_deref().unwrap_or(NOT_AVAILABLE))?;
        writeln!(f, "Assigned to: {}", self.assigned_to)?;
        writeln!(f, "Description:")?;
        writeln!(f, "{}", self.description)
    }
}
