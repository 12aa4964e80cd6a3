use anyhow::Context;
use clap::{Parser, Subcommand};
use mcp_for_azure_devops_reviews::azure::client::AzureDevOpsClient;
use mcp_for_azure_devops_reviews::config::Config;
use mcp_for_azure_devops_reviews::mcp::server::ReviewToolsServer;
use mcp_for_azure_devops_reviews::mcp::tools::pull_requests::describe_pull_request_reviews;
use mcp_for_azure_devops_reviews::mcp::tools::support::WorkItemFieldSet;
use mcp_for_azure_devops_reviews::mcp::tools::work_items::describe_work_item;
use mcp_for_azure_devops_reviews::planner::{Planner, PlannerClient};
use mcp_for_azure_devops_reviews::server::http;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run in server mode
    #[arg(long)]
    server: bool,

    /// Address to bind in server mode
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to run the server on
    #[arg(long, env = "MCP_PORT", default_value_t = 3000)]
    port: u16,

    /// Env file read when credentials are not exported
    #[arg(long, env = "MCP_ENV_FILE", default_value = ".env")]
    env_file: PathBuf,

    /// Leave the work item type out of rendered work items
    #[arg(long, env = "MCP_HIDE_WORK_ITEM_TYPE")]
    hide_work_item_type: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// One-shot commands printing what the matching tool would return
#[derive(Subcommand, Debug)]
enum Command {
    /// Print a work item
    WorkItem {
        #[arg(long)]
        id: u32,
    },
    /// Print the reviewer threads of a pull request
    Reviews {
        #[arg(long)]
        pull_request_id: u32,
    },
    /// Print a plan for a task
    Plan { task: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load(&args.env_file).context("Failed to load configuration")?;
    log::debug!("Loaded configuration: {:?}", config);

    let field_set = if args.hide_work_item_type {
        WorkItemFieldSet::without_kind()
    } else {
        WorkItemFieldSet::full()
    };
    let client = AzureDevOpsClient::new(&config.devops);
    let planner = config.planner.as_ref().map(PlannerClient::new);

    match args.command {
        Some(Command::WorkItem { id }) => {
            let text = describe_work_item(&client, &field_set, id)
                .await
                .with_context(|| format!("Failed to fetch work item {}", id))?;
            println!("{}", text);
        }
        Some(Command::Reviews { pull_request_id }) => {
            let text = describe_pull_request_reviews(&client, pull_request_id)
                .await
                .with_context(|| format!("Failed to fetch pull request {}", pull_request_id))?;
            println!("{}", text);
        }
        Some(Command::Plan { task }) => {
            let planner = planner.context(
                "Planner is not configured; set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY",
            )?;
            println!("{}", planner.plan(&task).await?);
        }
        None => {
            let mcp_server = ReviewToolsServer::new(client, planner, field_set);
            if args.server {
                log::info!("Starting web server on {}:{}", args.host, args.port);
                http::run_server(mcp_server, &args.host, args.port).await?;
            } else {
                log::info!("Starting stdio server");
                let service = mcp_server.serve(stdio()).await?;
                service.waiting().await?;
            }
        }
    }

    Ok(())
}
