//! Fetch seams consumed by the tool adapters.
//!
//! Each tool performs exactly one fetch through one of these traits, which
//! lets the adapters be exercised against mocks.

use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::{CommentThread, WorkItem};
use crate::azure::{pull_requests, work_items};
use async_trait::async_trait;

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait WorkItemSource: Send + Sync {
    async fn fetch_work_item(&self, id: u32) -> Result<WorkItem, AzureError>;
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait PullRequestThreadSource: Send + Sync {
    /// Threads of `pull_request_id` in the pre-configured repository.
    async fn fetch_threads(&self, pull_request_id: u32) -> Result<Vec<CommentThread>, AzureError>;
}

#[async_trait]
impl WorkItemSource for AzureDevOpsClient {
    async fn fetch_work_item(&self, id: u32) -> Result<WorkItem, AzureError> {
        work_items::get_work_item(self, id).await
    }
}

#[async_trait]
impl PullRequestThreadSource for AzureDevOpsClient {
    async fn fetch_threads(&self, pull_request_id: u32) -> Result<Vec<CommentThread>, AzureError> {
        let repository_id = self.repository_id().ok_or_else(|| {
            AzureError::NotConfigured(format!(
                "no repository for project {}; set {}",
                self.project(),
                crate::config::AZURE_DEVOPS_REPOSITORY_ID
            ))
        })?;
        pull_requests::list_threads(self, repository_id, pull_request_id).await
    }
}
