use crate::azure::client::AzureError;
use crate::azure::sources::PullRequestThreadSource;
use crate::mcp::tools::support::{deserialize_positive_id, normalize_threads, render_review_threads};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, ErrorCode},
    schemars::{self, JsonSchema},
    serde::Deserialize,
};

#[derive(Deserialize, JsonSchema)]
pub struct GetPullRequestReviewsArgs {
    /// Pull request ID in the configured repository
    #[serde(deserialize_with = "deserialize_positive_id")]
    pub pull_request_id: u32,
}

/// Fetch the threads of a pull request and render those with human comments.
pub async fn describe_pull_request_reviews(
    source: &impl PullRequestThreadSource,
    pull_request_id: u32,
) -> Result<String, AzureError> {
    let threads = source.fetch_threads(pull_request_id).await?;
    let reviews = normalize_threads(&threads);
    log::debug!(
        "Pull request {}: {} of {} threads have reviewer comments",
        pull_request_id,
        reviews.len(),
        threads.len()
    );
    Ok(render_review_threads(&reviews))
}

pub async fn get_pull_request_reviews(
    source: &impl PullRequestThreadSource,
    args: GetPullRequestReviewsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: get_pull_request_reviews(pull_request_id={})",
        args.pull_request_id
    );
    let text = describe_pull_request_reviews(source, args.pull_request_id)
        .await
        .map_err(|e| McpError {
            code: ErrorCode(-32000),
            message: e.to_string().into(),
            data: None,
        })?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::models::CommentThread;
    use crate::azure::sources::MockPullRequestThreadSource;
    use mockall::predicate::eq;

    fn threads(value: serde_json::Value) -> Vec<CommentThread> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_describe_reviews_keeps_only_human_threads() {
        let mut source = MockPullRequestThreadSource::new();
        source
            .expect_fetch_threads()
            .with(eq(42))
            .times(1)
            .returning(|_| {
                Ok(threads(serde_json::json!([
                    {
                        "id": 1,
                        "threadContext": {
                            "filePath": "/src/lib.rs",
                            "leftFileStart": { "line": 3, "offset": 1 },
                            "leftFileEnd": { "line": 5, "offset": 10 }
                        },
                        "comments": [
                            { "author": { "displayName": "Jane" }, "content": "Why clone here?", "commentType": "text" },
                            { "author": { "displayName": "John" }, "content": "Fixed", "commentType": "text" }
                        ]
                    },
                    {
                        "id": 2,
                        "threadContext": { "filePath": "/src/main.rs" },
                        "comments": [
                            { "author": { "displayName": "Azure DevOps" }, "content": "Status: fixed", "commentType": "system" }
                        ]
                    },
                    {
                        "id": 3,
                        "comments": [
                            { "author": { "displayName": "Jane" }, "content": "Approved", "commentType": "text" }
                        ]
                    }
                ])))
            });

        let text = describe_pull_request_reviews(&source, 42).await.unwrap();

        assert_eq!(
            text,
            "File: /src/lib.rs\n\
             Left file: L3:1-L5:10\n\
             Right file: N/A\n\
             Comments:\n - Jane: Why clone here?\n - John: Fixed"
        );
    }

    #[tokio::test]
    async fn test_no_reviewable_threads_renders_empty_string() {
        let mut source = MockPullRequestThreadSource::new();
        source.expect_fetch_threads().returning(|_| Ok(vec![]));

        let text = describe_pull_request_reviews(&source, 7).await.unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_tool_maps_failure_to_mcp_error() {
        let mut source = MockPullRequestThreadSource::new();
        source
            .expect_fetch_threads()
            .returning(|_| Err(AzureError::ApiError("TF401180: pull request not found".to_string())));

        let err = get_pull_request_reviews(&source, GetPullRequestReviewsArgs { pull_request_id: 9 })
            .await
            .unwrap_err();

        assert_eq!(err.code.0, -32000);
        assert!(err.message.contains("TF401180"));
    }
}
