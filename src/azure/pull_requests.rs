use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::{CommentThread, CommentThreadListResponse};

/// List every comment thread of a pull request, in the order the API returns them
pub async fn list_threads(
    client: &AzureDevOpsClient,
    repository_id: &str,
    pull_request_id: u32,
) -> Result<Vec<CommentThread>, AzureError> {
    let path = format!(
        "git/repositories/{}/pullRequests/{}/threads?api-version=7.1",
        repository_id, pull_request_id
    );
    let response: CommentThreadListResponse = client.get(&path).await?;
    Ok(response.value)
}
