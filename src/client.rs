use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use octocrab::{Octocrab, Page};
use serde::Serialize;

use crate::config::{FetchConfig, GitHubConfig, IssueState};
use crate::error::{Result, TriageError};
use crate::types::{Issue, IssuePage, Repository};

/// Listing parameters shared by every page request.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueQuery {
    pub state: IssueState,
    pub since: DateTime<Utc>,
    pub per_page: u32,
}

impl From<&FetchConfig> for IssueQuery {
    fn from(config: &FetchConfig) -> Self {
        Self {
            state: config.state.clone(),
            since: config.since,
            per_page: config.per_page,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListIssuesParams<'a> {
    state: &'a str,
    since: String,
    per_page: u32,
    page: u32,
}

/// Anything that can serve the issue listing of a repository one page at a time.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    async fn fetch_page(
        &self,
        repo: &Repository,
        query: &IssueQuery,
        page: u32,
    ) -> Result<IssuePage>;
}

pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&GitHubConfig::default())
    }

    /// Builds an unauthenticated client, subject to the anonymous rate limit.
    pub fn with_config(config: &GitHubConfig) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if !config.api_base_url.is_empty() && config.api_base_url != "https://api.github.com" {
            builder = builder
                .base_uri(config.api_base_url.as_str())
                .map_err(|e| TriageError::ConfigError(format!("Invalid base URI: {}", e)))?;
        }

        let octocrab = builder.build()?;
        Ok(Self { octocrab })
    }
}

impl IssueSource for GitHubClient {
    async fn fetch_page(
        &self,
        repo: &Repository,
        query: &IssueQuery,
        page: u32,
    ) -> Result<IssuePage> {
        debug!("Fetching page {} for {}", page, repo.full_name);

        let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let params = ListIssuesParams {
            state: query.state.as_str(),
            since: query.since.to_rfc3339_opts(SecondsFormat::Secs, true),
            per_page: query.per_page,
            page,
        };

        let issues_page: Page<Issue> = self
            .octocrab
            .get(route, Some(&params))
            .await
            .map_err(|e| TriageError::ApiError(format!("Failed to fetch issues: {}", e)))?;

        let next_page = issues_page
            .next
            .as_ref()
            .and_then(|next| page_param(next.query()));

        Ok(IssuePage {
            issues: issues_page.items,
            next_page,
        })
    }
}

/// Reads the `page` parameter out of a link's query string.
fn page_param(query: Option<&str>) -> Option<u32> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|page| *page > 0)
}

/// Walks the listing from page 1, following the server's next-page pointer
/// until there is none. Issues keep the order in which they were served.
/// A failed page aborts the walk and nothing collected so far is returned.
pub async fn fetch_all_issues<S: IssueSource>(
    source: &S,
    repo: &Repository,
    query: &IssueQuery,
) -> Result<Vec<Issue>> {
    info!("Collecting issues from {}", repo.full_name);

    let mut all_issues = Vec::new();
    let mut page = 1u32;

    loop {
        let issues_page = source.fetch_page(repo, query, page).await?;
        all_issues.extend(issues_page.issues);
        info!("Processing page: {}, totalIssues {}", page, all_issues.len());

        match issues_page.next_page {
            Some(next) => page = next,
            None => break,
        }
    }

    info!(
        "Collected {} issues from {}",
        all_issues.len(),
        repo.full_name
    );
    Ok(all_issues)
}
