use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// An issue as returned by the repository issues endpoint. Only the fields the
/// report needs are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Present when the entry is a pull request listed through the issues API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRef>,
}

impl Issue {
    pub fn new(number: u64, title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            number,
            title: title.into(),
            body,
            pull_request: None,
        }
    }

    /// The body text, with an absent body read as empty.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestRef {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// One page of the issue listing.
#[derive(Debug, Clone, Default)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    /// Page number announced by the server as next, `None` on the last page.
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub full_name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        let full_name = format!("{}/{}", owner, name);
        Self {
            owner,
            name,
            full_name,
        }
    }

    pub fn from_full_name(full_name: &str) -> Result<Self> {
        let parts: Vec<&str> = full_name.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|part| part.is_empty()) {
            return Err(TriageError::ConfigError(format!(
                "Invalid repository full name format. Expected 'owner/name', got: {}",
                full_name
            )));
        }
        Ok(Self::new(parts[0], parts[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_from_api_payload() {
        let payload = serde_json::json!({
            "id": 376543210,
            "number": 6305,
            "title": "docker-compose up fails with network error",
            "body": "## Description of the issue\r\n\r\nIt breaks.",
            "state": "open",
            "labels": [{ "name": "kind/bug" }],
            "comments": 4
        });

        let issue: Issue = serde_json::from_value(payload).unwrap();
        assert_eq!(issue.number, 6305);
        assert_eq!(issue.title, "docker-compose up fails with network error");
        assert!(issue.body_text().starts_with("## Description"));
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_null_body_and_pull_request() {
        let payload = serde_json::json!({
            "number": 6310,
            "title": "Bump requests",
            "body": null,
            "pull_request": {
                "url": "https://api.github.com/repos/docker/compose/pulls/6310",
                "html_url": "https://github.com/docker/compose/pull/6310"
            }
        });

        let issue: Issue = serde_json::from_value(payload).unwrap();
        assert_eq!(issue.body, None);
        assert_eq!(issue.body_text(), "");
        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_repository_from_full_name() {
        let repo = Repository::from_full_name("docker/compose").unwrap();
        assert_eq!(repo.owner, "docker");
        assert_eq!(repo.name, "compose");
        assert_eq!(repo.full_name, "docker/compose");

        assert!(Repository::from_full_name("docker").is_err());
        assert!(Repository::from_full_name("docker/").is_err());
        assert!(Repository::from_full_name("a/b/c").is_err());
    }
}
