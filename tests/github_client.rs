//! Integration tests for the GitHub API client.
//!
//! These tests exercise request construction, pagination, and error
//! mapping against a local mock HTTP server.

use mockito::{Matcher, Server};
use standup_cli::github::{GithubClient, GithubError};

fn client_for(server: &Server) -> GithubClient {
    GithubClient::with_base_url("test-token", &server.url())
}

#[test]
fn test_organization_lookup_sends_auth_header() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/orgs/acme")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"login": "acme", "id": 1}"#)
        .create();

    let organization = client_for(&server).organization("acme").unwrap();
    assert_eq!(organization.login, "acme");
    mock.assert();
}

#[test]
fn test_organization_404_maps_to_not_found() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/ghost")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    let err = client_for(&server).organization("ghost").unwrap_err();
    assert!(matches!(err, GithubError::OrganizationNotFound(name) if name == "ghost"));
}

#[test]
fn test_team_404_maps_to_not_found() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/acme/teams/ghost-team")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    let err = client_for(&server).team_by_slug("acme", "ghost-team").unwrap_err();
    assert!(matches!(err, GithubError::TeamNotFound(slug) if slug == "ghost-team"));
}

#[test]
fn test_team_lookup_returns_canonical_slug() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/acme/teams/data-platform")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"slug": "data-platform", "name": "Data Platform", "id": 42}"#)
        .create();

    let team = client_for(&server).team_by_slug("acme", "data-platform").unwrap();
    assert_eq!(team.slug, "data-platform");
    assert_eq!(team.name, "Data Platform");
}

#[test]
fn test_team_members_walks_pages() {
    let mut server = Server::new();

    let first_page: Vec<serde_json::Value> = (0..100)
        .map(|i| serde_json::json!({"login": format!("user{i}")}))
        .collect();
    let page1 = server
        .mock("GET", "/orgs/acme/teams/platform/members")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&first_page).unwrap())
        .create();
    let page2 = server
        .mock("GET", "/orgs/acme/teams/platform/members")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"login": "zara"}]"#)
        .create();

    let members = client_for(&server).team_members("acme", "platform").unwrap();
    assert_eq!(members.len(), 101);
    assert_eq!(members[0].login, "user0");
    assert_eq!(members[100].login, "zara");
    page1.assert();
    page2.assert();
}

#[test]
fn test_short_first_page_stops_pagination() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/orgs/acme/members")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"login": "alice"}, {"login": "bob"}]"#)
        .expect(1)
        .create();

    let members = client_for(&server).organization_members("acme").unwrap();
    assert_eq!(members.len(), 2);
    mock.assert();
}

#[test]
fn test_team_discussions_preserve_order() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/acme/teams/platform/discussions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"number": 9, "title": "Standup (Tuesday, April 04th, 2023)"},
                {"number": 8, "title": "Standup (Monday, April 03rd, 2023)"}
            ]"#,
        )
        .create();

    let discussions = client_for(&server).team_discussions("acme", "platform").unwrap();
    assert_eq!(discussions.len(), 2);
    assert_eq!(discussions[0].number, 9);
    assert_eq!(discussions[1].title, "Standup (Monday, April 03rd, 2023)");
}

#[test]
fn test_create_discussion_comment_posts_body_and_returns_permalink() {
    let permalink = "https://github.com/orgs/acme/teams/platform/discussions/8#discussioncomment-1";
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/orgs/acme/teams/platform/discussions/8/comments")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(serde_json::json!({
            "body": "**Yesterday**:\n - N/A"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"html_url": "{permalink}", "id": 1}}"#))
        .create();

    let comment = client_for(&server)
        .create_discussion_comment("acme", "platform", 8, "**Yesterday**:\n - N/A")
        .unwrap();
    assert_eq!(comment.html_url, permalink);
    mock.assert();
}

#[test]
fn test_server_error_surfaces_status_and_message() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/acme")
        .with_status(500)
        .with_body("boom")
        .create();

    let err = client_for(&server).organization("acme").unwrap_err();
    match err {
        GithubError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
