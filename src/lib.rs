pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod templates;
pub mod types;

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::info;

pub use classify::{Classification, TemplateClassifier};
pub use client::{fetch_all_issues, GitHubClient, IssueQuery, IssueSource};
pub use config::{FetchConfig, GitHubConfig, IssueState, TemplateConfig, TriageConfig};
pub use error::{Result, TriageError};
pub use report::{percentage, print_report, Tally};
pub use templates::{extract_markers, is_check_line, load_markers, TemplateMarkers};
pub use types::{Issue, IssuePage, Repository};

/// Fetches a repository's issues and reports how many follow each template.
pub struct IssueTriage {
    client: GitHubClient,
    classifier: TemplateClassifier,
    config: TriageConfig,
}

impl IssueTriage {
    pub fn new() -> Result<Self> {
        Self::with_config(TriageConfig::default())
    }

    /// Validates the configuration and loads both templates up front, so a
    /// missing template fails before any request is made.
    pub fn with_config(config: TriageConfig) -> Result<Self> {
        config.validate()?;

        let markers = TemplateMarkers::load(&config.templates)?;
        info!(
            "Loaded {} bug report and {} feature request markers",
            markers.bug_report.len(),
            markers.feature_request.len()
        );

        let client = GitHubClient::with_config(&config.github)?;

        Ok(Self {
            client,
            classifier: TemplateClassifier::new(markers),
            config,
        })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn classifier(&self) -> &TemplateClassifier {
        &self.classifier
    }

    pub async fn fetch_issues(&self) -> Result<Vec<Issue>> {
        let query = IssueQuery::from(&self.config.fetch);
        fetch_all_issues(&self.client, &self.config.repository, &query).await
    }

    pub fn classify(&self, issue: &Issue) -> Classification {
        self.classifier.classify(issue.body_text())
    }

    pub fn report<W: Write>(&self, out: W, issues: &[Issue]) -> Result<Tally> {
        Ok(print_report(out, &self.classifier, issues)?)
    }

    /// Fetches every issue, then prints the report to stdout.
    pub async fn run(&self) -> Result<Tally> {
        let issues = self.fetch_issues().await?;
        self.report(std::io::stdout().lock(), &issues)
    }
}

pub struct IssueTriageBuilder {
    config: TriageConfig,
}

impl IssueTriageBuilder {
    pub fn new() -> Self {
        Self {
            config: TriageConfig::default(),
        }
    }

    pub fn repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.config.repository = Repository::new(owner, name);
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.github.api_base_url = url.into();
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.config.fetch.since = since;
        self
    }

    pub fn state(mut self, state: IssueState) -> Self {
        self.config.fetch.state = state;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.config.fetch.per_page = per_page;
        self
    }

    pub fn templates(
        mut self,
        bug_report: impl Into<PathBuf>,
        feature_request: impl Into<PathBuf>,
    ) -> Self {
        self.config.templates = TemplateConfig {
            bug_report: bug_report.into(),
            feature_request: feature_request.into(),
        };
        self
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn build(self) -> Result<IssueTriage> {
        IssueTriage::with_config(self.config)
    }
}

impl Default for IssueTriageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
