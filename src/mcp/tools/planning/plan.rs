use crate::planner::{Planner, PlannerError};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, ErrorCode},
    schemars::{self, JsonSchema},
    serde::Deserialize,
};

#[derive(Deserialize, JsonSchema)]
pub struct PlanArgs {
    /// Task to plan, in free text
    pub task: String,
}

pub async fn plan(planner: Option<&impl Planner>, args: PlanArgs) -> Result<CallToolResult, McpError> {
    log::info!("Tool invoked: plan(task_length={})", args.task.len());

    let Some(planner) = planner else {
        return Err(McpError {
            code: ErrorCode(-32600),
            message: PlannerError::NotConfigured(
                "set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY".to_string(),
            )
            .to_string()
            .into(),
            data: None,
        });
    };

    let text = planner.plan(&args.task).await.map_err(|e| McpError {
        code: ErrorCode(-32000),
        message: e.to_string().into(),
        data: None,
    })?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}
