use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};
use crate::types::Repository;

pub const DEFAULT_PER_PAGE: u32 = 1000;
pub const BUG_REPORT_TEMPLATE: &str = ".github/ISSUE_TEMPLATE/bug_report.md";
pub const FEATURE_REQUEST_TEMPLATE: &str = ".github/ISSUE_TEMPLATE/feature_request.md";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    pub github: GitHubConfig,
    pub repository: Repository,
    pub fetch: FetchConfig,
    pub templates: TemplateConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            repository: Repository::new("docker", "compose"),
            fetch: FetchConfig::default(),
            templates: TemplateConfig::default(),
        }
    }
}

impl TriageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.repository.owner.is_empty() || self.repository.name.is_empty() {
            return Err(TriageError::ConfigError(format!(
                "Repository owner and name must be set, got '{}'",
                self.repository.full_name
            )));
        }
        if self.fetch.per_page == 0 {
            return Err(TriageError::ConfigError(
                "Page size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub api_base_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum IssueState {
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub state: IssueState,
    pub since: DateTime<Utc>,
    pub per_page: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            state: IssueState::All,
            since: templates_introduced(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub bug_report: PathBuf,
    pub feature_request: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            bug_report: PathBuf::from(BUG_REPORT_TEMPLATE),
            feature_request: PathBuf::from(FEATURE_REQUEST_TEMPLATE),
        }
    }
}

/// Local midnight of 2018-10-18, the day the bug and feature templates landed.
pub fn templates_introduced() -> DateTime<Utc> {
    let midnight = NaiveDate::from_ymd_opt(2018, 10, 18)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
