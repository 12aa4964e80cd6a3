use crate::azure::client::AzureDevOpsClient;
use crate::mcp::tools::support::WorkItemFieldSet;
use crate::mcp::tools::{planning, pull_requests, work_items};
use crate::planner::PlannerClient;
use rmcp::{
    ErrorData as McpError,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReviewToolsServer {
    client: Arc<AzureDevOpsClient>,
    planner: Option<Arc<PlannerClient>>,
    field_set: WorkItemFieldSet,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ReviewToolsServer {
    pub fn new(
        client: AzureDevOpsClient,
        planner: Option<PlannerClient>,
        field_set: WorkItemFieldSet,
    ) -> Self {
        Self {
            client: Arc::new(client),
            planner: planner.map(Arc::new),
            field_set,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Get an Azure DevOps work item by ID: type, title, assignee and description"
    )]
    async fn get_work_item(
        &self,
        args: Parameters<work_items::GetWorkItemArgs>,
    ) -> Result<CallToolResult, McpError> {
        work_items::get_work_item(self.client.as_ref(), &self.field_set, args.0).await
    }

    #[tool(
        description = "Get the reviewer comment threads of a pull request: file, line ranges and human comments"
    )]
    async fn get_pull_request_reviews(
        &self,
        args: Parameters<pull_requests::GetPullRequestReviewsArgs>,
    ) -> Result<CallToolResult, McpError> {
        pull_requests::get_pull_request_reviews(self.client.as_ref(), args.0).await
    }

    #[tool(
        description = "Ask a planner model for a step-by-step plan (sub-tasks, tests, checkpoints) for a software engineering task"
    )]
    async fn plan(
        &self,
        args: Parameters<planning::PlanArgs>,
    ) -> Result<CallToolResult, McpError> {
        planning::plan(self.planner.as_deref(), args.0).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ReviewToolsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "azure-devops-reviews-mcp-rust".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Use these tools to read Azure DevOps work items and pull request review comments, and to get a plan for a task".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DevOpsConfig, DevOpsCredential};
    use rmcp::ServerHandler;

    fn server(planner: Option<PlannerClient>) -> ReviewToolsServer {
        let client = AzureDevOpsClient::new(&DevOpsConfig {
            base_url: "https://dev.azure.com".to_string(),
            organization: "contoso".to_string(),
            project: "web".to_string(),
            repository_id: Some("repo-1".to_string()),
            credential: DevOpsCredential::PersonalAccessToken("pat".to_string()),
        });
        ReviewToolsServer::new(client, planner, WorkItemFieldSet::full())
    }

    #[test]
    fn test_registers_the_three_tools() {
        let server = server(None);
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec!["get_pull_request_reviews", "get_work_item", "plan"]
        );
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server(None).get_info();

        assert_eq!(info.server_info.name, "azure-devops-reviews-mcp-rust");
        assert!(info.capabilities.tools.is_some());
    }
}
