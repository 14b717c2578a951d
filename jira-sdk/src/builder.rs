// ABOUTME: Builder pattern implementation for JiraClient configuration
// ABOUTME: Provides type-safe configuration with compile-time validation

use crate::JiraClient;
use crate::constants::timeouts;
use crate::credentials::CredentialSet;
use crate::dispatcher::ApiVersionMode;
use crate::error::JiraError;
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<JiraClient, JiraError>))]
pub struct JiraClientConfig {
    pub credentials: CredentialSet,

    #[builder(default)]
    pub api_version: ApiVersionMode,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,
}

impl From<JiraClientConfig> for Result<JiraClient, JiraError> {
    fn from(config: JiraClientConfig) -> Self {
        JiraClient::from_config(config)
    }
}

impl JiraClient {
    pub fn builder() -> JiraClientConfigBuilder<((), (), ())> {
        JiraClientConfig::builder()
    }
}
