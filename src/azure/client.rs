use crate::config::{DevOpsConfig, DevOpsCredential};
use azure_core::auth::TokenCredential;
use azure_identity::DefaultAzureCredential;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

const AZURE_DEVOPS_SCOPE: &str = "499b84ac-1321-427f-aa17-267ca6975798";

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("Authentication failed: {0}")]
    AuthError(#[from] azure_core::Error),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

enum Credential {
    PersonalAccessToken(String),
    Entra(Arc<DefaultAzureCredential>),
}

/// Project-scoped Azure DevOps REST client.
///
/// Organization, project and credential are fixed at construction from the
/// process configuration.
pub struct AzureDevOpsClient {
    client: Client,
    credential: Credential,
    base_url: String,
    organization: String,
    project: String,
    repository_id: Option<String>,
}

impl AzureDevOpsClient {
    pub fn new(config: &DevOpsConfig) -> Self {
        let credential = match &config.credential {
            DevOpsCredential::PersonalAccessToken(pat) => {
                Credential::PersonalAccessToken(pat.clone())
            }
            DevOpsCredential::DefaultAzure => {
                Credential::Entra(Arc::new(DefaultAzureCredential::default()))
            }
        };

        Self {
            client: Client::new(),
            credential,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            organization: config.organization.clone(),
            project: config.project.clone(),
            repository_id: config.repository_id.clone(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Repository whose pull request threads are listed, if one is configured.
    pub fn repository_id(&self) -> Option<&str> {
        self.repository_id.as_deref()
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AzureError> {
        match &self.credential {
            Credential::PersonalAccessToken(pat) => Ok(request.basic_auth("", Some(pat))),
            Credential::Entra(credential) => {
                let token_response = credential.get_token(AZURE_DEVOPS_SCOPE).await?;
                Ok(request.bearer_auth(token_response.token.secret()))
            }
        }
    }

    /// GET `{base}/{organization}/{project}/_apis/{path}` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AzureError> {
        let url = format!(
            "{}/{}/{}/_apis/{}",
            self.base_url, self.organization, self.project, path
        );

        log::debug!("Request: GET {}", url);

        let request = self.authorize(self.client.get(&url)).await?;
        let response = request.send().await?;
        let status = response.status();

        log::debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::debug!("Error response: {}", error_text);
            return Err(AzureError::ApiError(error_text));
        }

        let response_text = response.text().await?;
        log::debug!("Response body: {}", response_text);

        let data = serde_json::from_str(&response_text)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> AzureDevOpsClient {
        AzureDevOpsClient::new(&DevOpsConfig {
            base_url: server.base_url(),
            organization: "contoso".to_string(),
            project: "web".to_string(),
            repository_id: Some("repo-1".to_string()),
            credential: DevOpsCredential::PersonalAccessToken("pat-token".to_string()),
        })
    }

    #[tokio::test]
    async fn test_get_uses_project_scoped_url_and_basic_auth() {
        let server = MockServer::start();
        // base64(":pat-token")
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/contoso/web/_apis/wit/tags")
                .query_param("api-version", "7.1")
                .header("authorization", "Basic OnBhdC10b2tlbg==");
            then.status(200)
                .json_body(serde_json::json!({ "count": 0, "value": [] }));
        });

        let client = client_for(&server);
        let value: serde_json::Value = client.get("wit/tags?api-version=7.1").await.unwrap();

        mock.assert();
        assert_eq!(value["count"], 0);
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_body_as_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/contoso/web/_apis/wit/workitems/1");
            then.status(401).body("TF400813: not authorized");
        });

        let client = client_for(&server);
        let err = client
            .get::<serde_json::Value>("wit/workitems/1")
            .await
            .unwrap_err();

        match err {
            AzureError::ApiError(message) => assert_eq!(message, "TF400813: not authorized"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_serde_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/contoso/web/_apis/wit/workitems/1");
            then.status(200).body("<html>sign in</html>");
        });

        let client = client_for(&server);
        let err = client
            .get::<serde_json::Value>("wit/workitems/1")
            .await
            .unwrap_err();

        assert!(matches!(err, AzureError::SerdeJson(_)));
    }

    #[test]
    fn test_accessors_reflect_config() {
        let client = AzureDevOpsClient::new(&DevOpsConfig {
            base_url: "https://dev.azure.com/".to_string(),
            organization: "contoso".to_string(),
            project: "web".to_string(),
            repository_id: None,
            credential: DevOpsCredential::PersonalAccessToken("pat".to_string()),
        });

        assert_eq!(client.organization, "contoso");
        assert_eq!(client.project(), "web");
        assert_eq!(client.repository_id(), None);
        assert_eq!(client.base_url, "https://dev.azure.com");
    }
}
