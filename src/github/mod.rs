//! GitHub REST API integration.
//!
//! Provides the lookups the standup flow needs (organization, team, member
//! rosters, team discussions) and the comment publisher, plus the error
//! taxonomy shared by all of them.
//!
//! # Submodules
//!
//! - `client` - HTTP client for the GitHub REST API

pub mod client;

// Re-exports for external use
pub use client::GithubClient;

/// Environment variable holding the GitHub API token.
pub const TOKEN_ENV_VAR: &str = "STANDUP_GITHUB_API_KEY";

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Custom error type for GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// The organization does not exist or the token cannot see it.
    #[error("organization '{0}' not found")]
    OrganizationNotFound(String),

    /// The team slug does not resolve within the organization.
    #[error("team '{0}' not found")]
    TeamNotFound(String),

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Normalizes a team name into a GitHub team slug.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single dash, so "Data Platform" and "data--platform"
/// both address the `data-platform` team.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}
