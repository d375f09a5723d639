// ABOUTME: GoogleSearchTool - queries the Google Custom Search JSON API.
// ABOUTME: Normalizes items into ranked records and classifies failures.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credential::{
    GOOGLE_API_KEY, GOOGLE_SEARCH_APP_ID, GOOGLE_SEARCH_ENGINE_ID, SearchCredentialSource,
};
use crate::error::{CredentialError, SearchError, ToolError};
use crate::tool::{ExpectedCredential, Tool, ToolPermission, ToolResult};

pub const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API never returns more than this many items per request.
pub const MAX_RESULTS: i64 = 10;

/// One entry in a search result list.
///
/// Failure and empty-result entries reuse this shape with an empty `link`
/// and no `rank` or `displayLink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(
        rename = "displayLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_link: Option<String>,
}

impl SearchRecord {
    fn notice(title: &str, snippet: String) -> Self {
        Self {
            rank: None,
            title: title.to_string(),
            link: String::new(),
            snippet,
            display_link: None,
        }
    }
}

/// Why a search produced no ranked results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The API answered 200 with no items.
    NoResults { query: String },

    /// HTTP 403 from a secret-store-backed search.
    ApiKeyRejected,

    /// Any other non-200 status.
    Status(u16),

    /// A required credential key is missing from the store.
    Configuration { key: String },

    /// Network errors, timeouts, malformed JSON, unreadable stores.
    Failed(String),
}

impl SearchFailure {
    pub fn title(&self) -> &'static str {
        match self {
            SearchFailure::NoResults { .. } => "No results found",
            SearchFailure::ApiKeyRejected => "API Error",
            SearchFailure::Status(_) => "Search Error",
            SearchFailure::Configuration { .. } => "Configuration Error",
            SearchFailure::Failed(_) => "Search Failed",
        }
    }

    pub fn snippet(&self) -> String {
        match self {
            SearchFailure::NoResults { query } => {
                format!("No search results found for: {}", query)
            }
            SearchFailure::ApiKeyRejected => {
                "Invalid API key or quota exceeded. Check credentials.".to_string()
            }
            SearchFailure::Status(status) => format!("Google API error: {}", status),
            SearchFailure::Configuration { key } => {
                format!("Missing credential: '{}'. Check connection setup in UI.", key)
            }
            SearchFailure::Failed(reason) => format!("Search error: {}", reason),
        }
    }

    /// An empty result set is an answer, not a fault.
    pub fn is_error(&self) -> bool {
        !matches!(self, SearchFailure::NoResults { .. })
    }

    /// Render as the single record returned in place of results.
    pub fn into_record(self) -> SearchRecord {
        SearchRecord::notice(self.title(), self.snippet())
    }
}

impl std::fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.snippet())
    }
}

impl From<CredentialError> for SearchFailure {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Missing { key } => SearchFailure::Configuration { key },
            other => SearchFailure::Failed(other.to_string()),
        }
    }
}

impl From<SearchError> for SearchFailure {
    fn from(err: SearchError) -> Self {
        SearchFailure::Failed(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<CseItem>>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    #[serde(rename = "displayLink")]
    display_link: Option<String>,
}

/// Map an HTTP status and body into ranked records or a failure.
///
/// `distinguish_forbidden` enables the 403 "API Error" branch; without it a
/// 403 is reported like any other status.
pub fn normalize_response(
    status: u16,
    body: &str,
    query: &str,
    distinguish_forbidden: bool,
) -> Result<Vec<SearchRecord>, SearchFailure> {
    match status {
        200 => {}
        403 if distinguish_forbidden => return Err(SearchFailure::ApiKeyRejected),
        other => return Err(SearchFailure::Status(other)),
    }

    let response: CseResponse = serde_json::from_str(body).map_err(SearchError::from)?;
    let records: Vec<SearchRecord> = response
        .items
        .unwrap_or_default()
        .into_iter()
        .zip(1u32..)
        .map(|(item, rank)| SearchRecord {
            rank: Some(rank),
            title: item.title.unwrap_or_else(|| "No Title".to_string()),
            link: item.link.unwrap_or_else(|| "No URL".to_string()),
            snippet: item
                .snippet
                .unwrap_or_else(|| "No description available".to_string()),
            display_link: Some(
                item.display_link
                    .unwrap_or_else(|| "Unknown domain".to_string()),
            ),
        })
        .collect();

    if records.is_empty() {
        return Err(SearchFailure::NoResults {
            query: query.to_string(),
        });
    }
    Ok(records)
}

/// Endpoint and timeout for search requests.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_SEARCH_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Tool for searching the web with Google Custom Search.
pub struct GoogleSearchTool {
    client: reqwest::Client,
    source: SearchCredentialSource,
    endpoint: String,
}

impl GoogleSearchTool {
    /// Create a search tool with its own HTTP client.
    pub fn new(source: SearchCredentialSource, config: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("errand/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, source).endpoint(config.endpoint))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, source: SearchCredentialSource) -> Self {
        Self {
            client,
            source,
            endpoint: GOOGLE_SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Override the search endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Run a search, returning ranked records or the classified failure.
    pub async fn try_search(
        &self,
        query: &str,
        num_results: i64,
    ) -> Result<Vec<SearchRecord>, SearchFailure> {
        let creds = self.source.resolve().await?;
        let num = num_results.min(MAX_RESULTS).to_string();

        tracing::debug!(query, num = %num, source = ?self.source, "google search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", creds.api_key.as_str()),
                ("cx", creds.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("safe", "medium"),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .send()
            .await
            .map_err(SearchError::from)?;

        let status = response.status().as_u16();
        let body = if status == 200 {
            response.text().await.map_err(SearchError::from)?
        } else {
            String::new()
        };

        normalize_response(status, &body, query, self.source.is_secret_store())
    }

    /// Run a search; failures come back as a single descriptive record.
    pub async fn search(&self, query: &str, num_results: i64) -> Vec<SearchRecord> {
        self.run(query, num_results).await.0
    }

    async fn run(&self, query: &str, num_results: i64) -> (Vec<SearchRecord>, bool) {
        match self.try_search(query, num_results).await {
            Ok(records) => {
                tracing::info!(query, results = records.len(), "search completed");
                (records, false)
            }
            Err(failure) => {
                let failed = failure.is_error();
                if failed {
                    tracing::warn!(query, %failure, "search failed");
                }
                (vec![failure.into_record()], failed)
            }
        }
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Search the web using Google Custom Search. Returns a ranked list of results \
         with title, link, snippet, and display domain."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to execute"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (1-10, default: 10)",
                    "default": 10
                }
            },
            "required": ["query"]
        })
    }

    fn permission(&self) -> ToolPermission {
        ToolPermission::ReadOnly
    }

    fn expected_credentials(&self) -> Vec<ExpectedCredential> {
        if self.source.is_secret_store() {
            vec![ExpectedCredential::key_value(
                GOOGLE_SEARCH_APP_ID,
                &[GOOGLE_API_KEY, GOOGLE_SEARCH_ENGINE_ID],
            )]
        } else {
            Vec::new()
        }
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
            #[serde(default = "default_num_results")]
            num_results: i64,
        }

        fn default_num_results() -> i64 {
            MAX_RESULTS
        }

        let params: Params = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let (records, failed) = self.run(&params.query, params.num_results).await;

        let result = ToolResult::json(&records)?;
        Ok(if failed { result.failed() } else { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ranks_in_order() {
        let body = r#"{"items": [
            {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language", "displayLink": "rust-lang.org"},
            {"title": "Cargo", "link": "https://doc.rust-lang.org/cargo", "snippet": "Build tool", "displayLink": "doc.rust-lang.org"}
        ]}"#;
        let records = normalize_response(200, body, "rust", true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rank, Some(1));
        assert_eq!(records[0].title, "Rust");
        assert_eq!(records[1].rank, Some(2));
        assert_eq!(records[1].display_link.as_deref(), Some("doc.rust-lang.org"));
    }

    #[test]
    fn test_normalize_placeholders() {
        let body = r#"{"items": [{}]}"#;
        let records = normalize_response(200, body, "q", true).unwrap();
        assert_eq!(
            records[0],
            SearchRecord {
                rank: Some(1),
                title: "No Title".into(),
                link: "No URL".into(),
                snippet: "No description available".into(),
                display_link: Some("Unknown domain".into()),
            }
        );
    }

    #[test]
    fn test_normalize_no_items() {
        for body in [r#"{}"#, r#"{"items": []}"#] {
            let failure = normalize_response(200, body, "obscure words", true).unwrap_err();
            assert!(!failure.is_error());
            let record = failure.into_record();
            assert_eq!(record.title, "No results found");
            assert_eq!(record.link, "");
            assert!(record.snippet.contains("obscure words"));
        }
    }

    #[test]
    fn test_normalize_forbidden() {
        let failure = normalize_response(403, "", "q", true).unwrap_err();
        assert_eq!(failure, SearchFailure::ApiKeyRejected);
        assert_eq!(failure.into_record().title, "API Error");
    }

    #[test]
    fn test_normalize_forbidden_without_key_errors() {
        let failure = normalize_response(403, "", "q", false).unwrap_err();
        assert_eq!(failure, SearchFailure::Status(403));
        let record = failure.into_record();
        assert_eq!(record.title, "Search Error");
        assert!(record.snippet.contains("403"));
    }

    #[test]
    fn test_normalize_server_error() {
        let record = normalize_response(500, "oops", "q", true)
            .unwrap_err()
            .into_record();
        assert_eq!(record.title, "Search Error");
        assert_eq!(record.snippet, "Google API error: 500");
    }

    #[test]
    fn test_normalize_malformed_json() {
        let failure = normalize_response(200, "<html>", "q", true).unwrap_err();
        assert!(matches!(failure, SearchFailure::Failed(_)));
        let record = failure.into_record();
        assert_eq!(record.title, "Search Failed");
        assert!(record.snippet.starts_with("Search error: "));
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let failure = SearchFailure::from(CredentialError::Missing {
            key: GOOGLE_API_KEY.to_string(),
        });
        let record = failure.into_record();
        assert_eq!(record.title, "Configuration Error");
        assert_eq!(
            record.snippet,
            "Missing credential: 'GOOGLE_API_KEY'. Check connection setup in UI."
        );
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "https://www.googleapis.com/customsearch/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_notice_record_serialization() {
        let json = serde_json::to_value(SearchFailure::Status(502).into_record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Search Error",
                "link": "",
                "snippet": "Google API error: 502"
            })
        );
    }

    #[test]
    fn test_ranked_record_serialization() {
        let records =
            normalize_response(200, r#"{"items": [{"title": "t"}]}"#, "q", true).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["displayLink"], "Unknown domain");
    }
}
