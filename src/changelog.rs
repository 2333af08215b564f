//! Commit changelogs for upgraded GitHub modules
//!
//! Uses the GitHub REST API:
//! - Compare: {api}/repos/{owner}/{repo}/compare/{before}...{after}
//! - Gists: POST {api}/gists

use crate::domain::{Action, DependencyResult};
use crate::error::{ChangelogError, RegistryError};
use crate::output::Output;
use crate::registry::HttpClient;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Registry name used in error messages
const REGISTRY_NAME: &str = "GitHub";

/// Where a changelog is published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogDest {
    /// Printed through the transcript
    Stdout,
    /// Uploaded as a private gist
    Gist,
    /// Written to a file
    File(PathBuf),
}

/// Compare API response
#[derive(Debug, Deserialize)]
struct CompareResponse {
    commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: String,
}

/// Gist creation request
#[derive(Debug, Serialize)]
struct GistRequest<'a> {
    description: &'a str,
    public: bool,
    files: HashMap<&'a str, GistFile<'a>>,
}

#[derive(Debug, Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

/// Gist creation response
#[derive(Debug, Deserialize)]
struct GistResponse {
    html_url: String,
}

/// A commit between two versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Full commit hash
    pub sha: String,
    /// First line of the commit message
    pub title: String,
    /// Author name
    pub author: String,
}

impl From<CompareCommit> for CommitSummary {
    fn from(commit: CompareCommit) -> Self {
        Self {
            title: commit
                .commit
                .message
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
            author: commit
                .commit
                .author
                .map(|a| a.name)
                .unwrap_or_default(),
            sha: commit.sha,
        }
    }
}

/// GitHub API client
pub struct GitHubClient {
    client: HttpClient,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for the public GitHub API
    pub fn new(client: HttpClient, token: Option<String>) -> Self {
        Self::with_api_base(client, GITHUB_API_URL, token)
    }

    /// Create a client for a custom API base URL
    pub fn with_api_base(client: HttpClient, api_base: &str, token: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Commits between two tags of a repository
    pub async fn compare(
        &self,
        owner: &str,
        repo: &str,
        before: &str,
        after: &str,
    ) -> Result<Vec<CommitSummary>, RegistryError> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_base, owner, repo, before, after
        );
        let package = format!("{}/{}", owner, repo);
        let response: CompareResponse = self
            .client
            .get_json(&url, &package, REGISTRY_NAME)
            .await?;
        Ok(response.commits.into_iter().map(CommitSummary::from).collect())
    }

    /// Create a private gist with a single `changelog.md` file, returning its URL
    pub async fn create_gist(
        &self,
        description: &str,
        content: &str,
    ) -> Result<String, ChangelogError> {
        let token = self.token.as_deref().ok_or(ChangelogError::MissingToken)?;
        let request = GistRequest {
            description,
            public: false,
            files: HashMap::from([("changelog.md", GistFile { content })]),
        };

        let url = format!("{}/gists", self.api_base);
        tracing::debug!(url = url.as_str(), "POST");
        let response = self
            .client
            .inner()
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", token))
            .json(&request)
            .send()
            .await
            .map_err(|e| ChangelogError::Gist(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            return Err(ChangelogError::Gist(format!("HTTP {}", response.status())));
        }

        let gist: GistResponse = response
            .json()
            .await
            .map_err(|e| ChangelogError::Gist(format!("failed to parse JSON: {}", e)))?;
        Ok(gist.html_url)
    }
}

/// Owner and repository of a `github.com/{owner}/{repo}/...` module path
pub fn github_repo(module_path: &str) -> Option<(&str, &str)> {
    let mut parts = module_path.split('/');
    if parts.next()? != "github.com" {
        return None;
    }
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    Some((owner, repo))
}

/// Render commits as a bullet list
pub fn render_commits(commits: &[CommitSummary]) -> String {
    commits
        .iter()
        .map(|c| {
            let short = c.sha.get(..7).unwrap_or(&c.sha);
            format!("* {}: {} ({})\n", short, c.title, c.author)
        })
        .collect()
}

/// Build the changelog document for every upgraded GitHub module
///
/// Lookup failures are recorded in the document instead of aborting it.
pub async fn build_changelog(
    github: &GitHubClient,
    results: &[DependencyResult],
    markdown: bool,
) -> String {
    let mut doc = String::new();
    if markdown {
        doc.push_str("# gobump changelog\n\n");
    }

    for result in results.iter().filter(|r| r.action() == Action::Upgraded) {
        let Some((owner, repo)) = github_repo(&result.module_path) else {
            continue;
        };
        let after = result.version_after.as_deref().unwrap_or_default();

        if markdown {
            doc.push_str(&format!(
                "## {}\n\nUpdated from `{}` to `{}`\n\n",
                result.module_path, result.version_before, after
            ));
        } else {
            doc.push_str(&format!(
                "\nModule: {}\nUpdated from {} to {}\n",
                result.module_path, result.version_before, after
            ));
        }

        match github
            .compare(owner, repo, &result.version_before, after)
            .await
        {
            Ok(commits) if commits.is_empty() => {
                doc.push_str("No commits found between versions.\n");
            }
            Ok(commits) => doc.push_str(&render_commits(&commits)),
            Err(e) => {
                tracing::debug!(module = result.module_path.as_str(), error = %e, "compare failed");
                doc.push_str(&format!("Failed to get changelog: {}\n", e));
            }
        }
        if markdown {
            doc.push('\n');
        }
    }

    doc
}

/// Build and publish the changelog to its destination
pub async fn publish_changelog(
    github: &GitHubClient,
    results: &[DependencyResult],
    dest: &ChangelogDest,
    out: &mut dyn Output,
) -> Result<(), ChangelogError> {
    match dest {
        ChangelogDest::Stdout => {
            let doc = build_changelog(github, results, false).await;
            out.header("Changelogs");
            out.raw(&doc);
        }
        ChangelogDest::File(path) => {
            let doc = build_changelog(github, results, false).await;
            std::fs::write(path, doc).map_err(|source| ChangelogError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "changelog written");
        }
        ChangelogDest::Gist => {
            let doc = build_changelog(github, results, true).await;
            let url = github
                .create_gist("gobump dependency changelog", &doc)
                .await?;
            out.line(&format!("Changelog gist created: {}", url));
        }
    }
    Ok(())
}
