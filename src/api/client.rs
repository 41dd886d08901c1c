use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::models::{PagedResponse, Project, PullRequest, Repository};
use crate::config::ReminderConfig;
use crate::constants;
use crate::error::{ApiError, Error};
use crate::utils::debug;

/// Bitbucket Server API client.
///
/// Speaks the 1.0 REST API with Basic Auth. Every listing call fetches a
/// single page with an explicit limit; the job never walks pagination.
#[derive(Clone)]
pub struct BitbucketClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl BitbucketClient {
    pub fn new(cfg: &ReminderConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/{}",
                cfg.bitbucket.host.trim_end_matches('/'),
                constants::API_BASE_PATH
            ),
            username: cfg.bitbucket.user.clone(),
            password: cfg.bitbucket.password.clone(),
        })
    }

    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        debug::log(&format!("Requesting: {} {}", method, url));

        self.client
            .request(method, &url)
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.build_request(Method::GET, path).send().await?;

        debug::log(&format!("Response status: {}", response.status()));

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read error body".to_string());
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    /// List the first page of projects visible to the credentials.
    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let path = format!("projects?limit={}", constants::PROJECT_PAGE_LIMIT);
        let page: PagedResponse<Project> = self
            .get(&path)
            .await
            .map_err(|e| Error::fetch("projects", e))?;
        Ok(page.values)
    }

    /// List the first page of repositories under a project.
    pub async fn list_repositories(&self, project_key: &str) -> Result<Vec<Repository>, Error> {
        let path = format!(
            "projects/{}/repos?limit={}",
            project_key,
            constants::REPO_PAGE_LIMIT
        );
        let page: PagedResponse<Repository> = self
            .get(&path)
            .await
            .map_err(|e| Error::fetch(format!("repositories of {}", project_key), e))?;
        Ok(page.values)
    }

    /// List the first page of open pull requests for a repository, with
    /// reviewer metadata included.
    pub async fn list_pull_requests(
        &self,
        project_key: &str,
        repo_slug: &str,
    ) -> Result<Vec<PullRequest>, Error> {
        let path = format!(
            "projects/{}/repos/{}/pull-requests?limit={}&withProperties=true",
            project_key,
            repo_slug,
            constants::PULL_REQUEST_PAGE_LIMIT
        );
        let page: PagedResponse<PullRequest> = self
            .get(&path)
            .await
            .map_err(|e| {
                Error::fetch(format!("pull requests of {}/{}", project_key, repo_slug), e)
            })?;
        Ok(page.values)
    }
}
