//! GitHub REST API tag source

use crate::error::{NextTagError, Result};
use crate::remote::{ListingKind, RepoSlug, TagSource};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Page size requested from the API (its maximum)
pub const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct TagItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseItem {
    tag_name: String,
}

/// Lists tags or releases of a GitHub repository, following pagination to the last page
pub struct GitHubTagSource {
    client: Client,
    base_url: String,
    slug: RepoSlug,
    token: Option<String>,
}

impl GitHubTagSource {
    /// Create a source against `base_url` (e.g. [DEFAULT_BASE_URL] or a GitHub Enterprise host)
    pub fn new(base_url: &str, slug: RepoSlug, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("next-tag/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubTagSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            slug,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn fetch_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<T> = self.fetch_page(endpoint, page)?;
            let len = batch.len();
            items.extend(batch);
            debug!(endpoint, page, len, total = items.len(), "fetched page");
            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    fn fetch_page<T: DeserializeOwned>(&self, endpoint: &str, page: usize) -> Result<Vec<T>> {
        let url = format!("{}/repos/{}/{}", self.base_url, self.slug, endpoint);
        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(&[("per_page", PER_PAGE), ("page", page)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(NextTagError::remote(format!(
                "Repository not found: {}",
                self.slug
            )));
        }

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return Err(NextTagError::remote(match retry_after {
                Some(secs) => format!("GitHub API rate limited, retry after {} seconds", secs),
                None => format!("GitHub API refused the request ({})", status),
            }));
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(NextTagError::remote(format!("Unexpected status: {}", status)));
        }

        response.json().map_err(|e| {
            warn!("Failed to parse GitHub response: {}", e);
            NextTagError::remote(format!("Invalid response from {}: {}", url, e))
        })
    }
}

impl TagSource for GitHubTagSource {
    fn list_names(&self, kind: ListingKind) -> Result<Vec<String>> {
        let names: Vec<String> = match kind {
            ListingKind::Tags => self
                .fetch_all::<TagItem>("tags")?
                .into_iter()
                .map(|t| t.name)
                .collect(),
            ListingKind::Releases => self
                .fetch_all::<ReleaseItem>("releases")?
                .into_iter()
                .map(|r| r.tag_name)
                .collect(),
        };
        debug!(repository = %self.slug, ?kind, count = names.len(), "listed names");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn source(server: &Server) -> GitHubTagSource {
        GitHubTagSource::new(&server.url(), RepoSlug::parse("acme/api").unwrap(), None).unwrap()
    }

    fn page_query(page: usize) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), PER_PAGE.to_string()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ])
    }

    #[test]
    fn test_lists_tags_single_page() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/repos/acme/api/tags")
            .match_query(page_query(1))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "v1.2.0", "commit": {"sha": "abc"}}, {"name": "v1.1.0"}]"#)
            .create();

        let names = source(&server).list_names(ListingKind::Tags).unwrap();

        mock.assert();
        assert_eq!(names, vec!["v1.2.0".to_string(), "v1.1.0".to_string()]);
    }

    #[test]
    fn test_follows_pagination_until_short_page() {
        let mut server = Server::new();
        let first: Vec<serde_json::Value> = (0..PER_PAGE)
            .map(|i| serde_json::json!({ "tag_name": format!("1.0.{}", i) }))
            .collect();
        let first_page = server
            .mock("GET", "/repos/acme/api/releases")
            .match_query(page_query(1))
            .with_status(200)
            .with_body(serde_json::to_string(&first).unwrap())
            .create();
        let second_page = server
            .mock("GET", "/repos/acme/api/releases")
            .match_query(page_query(2))
            .with_status(200)
            .with_body(r#"[{"tag_name": "0.9.0"}]"#)
            .create();

        let names = source(&server).list_names(ListingKind::Releases).unwrap();

        first_page.assert();
        second_page.assert();
        assert_eq!(names.len(), PER_PAGE + 1);
        assert_eq!(names[0], "1.0.0");
        assert_eq!(names[PER_PAGE], "0.9.0");
    }

    #[test]
    fn test_sends_bearer_token() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/repos/acme/api/tags")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_body("[]")
            .create();

        let source = GitHubTagSource::new(
            &server.url(),
            RepoSlug::parse("acme/api").unwrap(),
            Some("s3cret".to_string()),
        )
        .unwrap();

        assert!(source.list_names(ListingKind::Tags).unwrap().is_empty());
        mock.assert();
    }

    #[test]
    fn test_not_found() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/acme/api/tags")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create();

        let err = source(&server).list_names(ListingKind::Tags).unwrap_err();
        assert!(err.to_string().contains("Repository not found: acme/api"));
    }

    #[test]
    fn test_rate_limited() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/acme/api/tags")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("retry-after", "60")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create();

        let err = source(&server).list_names(ListingKind::Tags).unwrap_err();
        assert!(err.to_string().contains("retry after 60 seconds"));
    }

    #[test]
    fn test_invalid_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/acme/api/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create();

        let err = source(&server).list_names(ListingKind::Tags).unwrap_err();
        assert!(matches!(err, NextTagError::Remote(_)));
    }
}
