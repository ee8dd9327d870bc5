//! HTTP client for the GitHub REST API.
//!
//! Provides the `GithubClient` used to resolve the organization, team,
//! member rosters, and team discussions, and to publish the standup
//! comment. List endpoints are page-walked transparently.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{GithubError, DEFAULT_API_URL};

/// Maximum page size accepted by GitHub list endpoints.
const PER_PAGE: usize = 100;

/// User-Agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("standup/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for the standup lookups and comment submission.
pub struct GithubClient {
    /// HTTP client instance.
    client: Client,
    /// Base URL of the API.
    base_url: String,
    /// API token for authentication.
    token: String,
}

impl GithubClient {
    /// Creates a client against api.github.com.
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a custom API root (used by tests and
    /// GitHub Enterprise installs).
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Returns the configured base URL.
    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an organization, confirming the token can see it.
    pub fn organization(&self, org: &str) -> Result<Organization, GithubError> {
        self.get_json(&format!("/orgs/{org}"), &[])
            .map_err(|err| match err {
                GithubError::Api { status: 404, .. } => {
                    GithubError::OrganizationNotFound(org.to_string())
                }
                other => other,
            })
    }

    /// Resolves a team by its slug within an organization.
    pub fn team_by_slug(&self, org: &str, slug: &str) -> Result<Team, GithubError> {
        self.get_json(&format!("/orgs/{org}/teams/{slug}"), &[])
            .map_err(|err| match err {
                GithubError::Api { status: 404, .. } => GithubError::TeamNotFound(slug.to_string()),
                other => other,
            })
    }

    /// Lists the members of a team.
    pub fn team_members(&self, org: &str, slug: &str) -> Result<Vec<Member>, GithubError> {
        self.get_paginated(&format!("/orgs/{org}/teams/{slug}/members"))
    }

    /// Lists the members of an organization.
    pub fn organization_members(&self, org: &str) -> Result<Vec<Member>, GithubError> {
        self.get_paginated(&format!("/orgs/{org}/members"))
    }

    /// Lists a team's discussion threads, newest first as GitHub returns
    /// them.
    pub fn team_discussions(&self, org: &str, slug: &str) -> Result<Vec<Discussion>, GithubError> {
        self.get_paginated(&format!("/orgs/{org}/teams/{slug}/discussions"))
    }

    /// Posts `body` as a new comment on a team discussion and returns the
    /// created comment with its permalink.
    pub fn create_discussion_comment(
        &self,
        org: &str,
        slug: &str,
        number: u64,
        body: &str,
    ) -> Result<DiscussionComment, GithubError> {
        let path = format!("/orgs/{org}/teams/{slug}/discussions/{number}/comments");
        self.post_json(&path, &CommentRequest { body })
    }

    /// Issues a GET request and decodes the JSON response.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()?;

        Self::decode(response)
    }

    /// Issues a POST request with a JSON payload and decodes the response.
    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, GithubError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(payload)
            .send()?;

        Self::decode(response)
    }

    /// Walks a list endpoint page by page until a short page signals the
    /// end.
    fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GithubError> {
        let mut all = Vec::new();
        for page in 1u32.. {
            let batch: Vec<T> = self.get_json(
                path,
                &[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let fetched = batch.len();
            all.extend(batch);
            if fetched < PER_PAGE {
                break;
            }
        }
        Ok(all)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GithubError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json()?)
    }
}

// ==================== API Types ====================

/// Organization summary returned by the orgs endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    /// Organization login name.
    pub login: String,
}

/// A team within an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    /// URL-safe team identifier used in API paths.
    pub slug: String,
    /// Human-readable team name.
    pub name: String,
}

/// A user reference as returned by member listings.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    /// The user's login (username).
    pub login: String,
}

/// A team discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Discussion {
    /// Discussion number within the team.
    pub number: u64,
    /// Discussion title.
    pub title: String,
}

/// A comment created on a team discussion.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionComment {
    /// Browser-facing permalink for the comment.
    pub html_url: String,
}

/// Request payload for creating a discussion comment.
#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    /// Comment body in GitHub-flavored markdown.
    body: &'a str,
}
