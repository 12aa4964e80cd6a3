use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::WorkItem;

/// Fetch a single work item with all of its fields
pub async fn get_work_item(client: &AzureDevOpsClient, id: u32) -> Result<WorkItem, AzureError> {
    let path = format!("wit/workitems/{}?api-version=7.1", id);
    client.get(&path).await
}
