// Support module for shared utility functions
mod deserialize_positive_id;
mod html_to_text;
mod review_thread;
mod work_item_record;

pub use deserialize_positive_id::deserialize_positive_id;
pub use review_thread::{ReviewThread, format_line_range, normalize_threads, render_review_threads};
pub use work_item_record::{
    FIELD_MAPPINGS, FieldMapping, NO_DESCRIPTION, UNASSIGNED, WorkItemAttribute,
    WorkItemFieldSet, WorkItemRecord,
};
