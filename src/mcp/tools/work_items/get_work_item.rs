use crate::azure::client::AzureError;
use crate::azure::sources::WorkItemSource;
use crate::mcp::tools::support::{WorkItemFieldSet, WorkItemRecord, deserialize_positive_id};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, ErrorCode},
    schemars::{self, JsonSchema},
    serde::Deserialize,
};

#[derive(Deserialize, JsonSchema)]
pub struct GetWorkItemArgs {
    /// Work item ID
    #[serde(alias = "work_item_id", deserialize_with = "deserialize_positive_id")]
    pub id: u32,
}

/// Fetch one work item and render it as labeled lines.
pub async fn describe_work_item(
    source: &impl WorkItemSource,
    field_set: &WorkItemFieldSet,
    id: u32,
) -> Result<String, AzureError> {
    let work_item = source.fetch_work_item(id).await?;
    Ok(WorkItemRecord::from_rest(&work_item, field_set).to_string())
}

pub async fn get_work_item(
    source: &impl WorkItemSource,
    field_set: &WorkItemFieldSet,
    args: GetWorkItemArgs,
) -> Result<CallToolResult, McpError> {
    log::info!("Tool invoked: get_work_item(id={})", args.id);
    let text = describe_work_item(source, field_set, args.id)
        .await
        .map_err(|e| McpError {
            code: ErrorCode(-32000),
            message: e.to_string().into(),
            data: None,
        })?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}
