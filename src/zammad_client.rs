//! HTTP client for the Zammad REST API.
//!
//! This module provides the `ZammadClient` struct for making authenticated
//! requests to a Zammad instance.
//!
//! # Failure handling
//!
//! Every request is sent exactly once. Non-success responses become
//! `ZammadError::Api` carrying the status, a detail string and the request
//! path; nothing is retried. Update and create calls therefore mutate remote
//! state at most once per call, and a transport failure mid-request leaves
//! the remote state unknown.
//!
//! # Security
//!
//! The access token is never logged. Error details are sanitized before they
//! are stored in an error value.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::config::Config;
use crate::error::ZammadError;
use crate::models::{Article, CreateArticle, Ticket, TicketState, UpdateTicket, User};
use crate::pagination::TicketLister;

/// Content type sent with every request.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Options for a single API request.
///
/// Extra headers replace the default `Authorization` and `Content-Type`
/// headers when their names collide.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Additional headers, applied after the defaults.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// A GET request without body.
    pub fn get() -> Self {
        Self::default()
    }

    /// A request with the given method and JSON body.
    pub fn with_body(method: Method, body: serde_json::Value) -> Self {
        Self {
            method,
            body: Some(body),
            headers: Vec::new(),
        }
    }

    /// Adds an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client for the Zammad API.
///
/// Handles authentication, request formatting, and response parsing for all
/// ticket, article, user and state operations. The instance is immutable
/// after construction.
///
/// # Example
///
/// ```ignore
/// let config = Config::load(&ConfigStore::default_location()?)?;
/// let client = ZammadClient::new(&config)?;
///
/// let tickets = client.list_tickets(1, 25).await?;
/// ```
#[derive(Clone)]
pub struct ZammadClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL without trailing slashes (e.g., `https://support.example.com`).
    base_url: String,

    /// Pre-built `Token token=<token>` header value, marked sensitive.
    auth_header: HeaderValue,

    /// Raw token, kept only for sanitizing error text.
    /// SECURITY: Never log this value!
    token: String,
}

impl ZammadClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::HttpClient` if the HTTP client fails to
    /// initialize, or `ZammadError::Config` if the token cannot be used as
    /// an HTTP header value.
    pub fn new(config: &Config) -> Result<Self, ZammadError> {
        let http = Client::builder().build().map_err(ZammadError::HttpClient)?;

        let mut auth_header = HeaderValue::from_str(&format!("Token token={}", config.token()))
            .map_err(|_| {
                ZammadError::invalid_config(
                    "access token contains characters that are not allowed in an HTTP header",
                )
            })?;
        auth_header.set_sensitive(true);

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(&config.url),
            auth_header,
            token: config.token().to_string(),
        })
    }

    /// Strips every trailing slash from the base URL.
    fn normalize_base_url(url: &str) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Returns the web UI URL for a ticket.
    pub fn ticket_web_url(&self, id: u64) -> String {
        format!("{}/#ticket/zoom/{}", self.base_url, id)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds the header map for a request: defaults first, then extras.
    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ZammadError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ZammadError::validation(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ZammadError::validation(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Makes a request to the Zammad API.
    ///
    /// This is the primitive every operation goes through. `path` must
    /// already contain any query string. Success bodies are parsed as JSON
    /// into `T`; a body that does not parse is returned as
    /// `ZammadError::Serialization`.
    pub async fn request<T>(&self, path: &str, options: RequestOptions) -> Result<T, ZammadError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(path);
        let headers = self.build_headers(&options.headers)?;

        tracing::debug!(
            method = %options.method,
            path = %path,
            "Making Zammad API request"
        );

        let mut req = self.http.request(options.method, &url).headers(headers);

        if let Some(body) = &options.body {
            req = req.body(serde_json::to_string(body)?);
        }

        let response = req.send().await.map_err(ZammadError::Http)?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, path, response).await);
        }

        let body = response.text().await.map_err(ZammadError::Http)?;

        tracing::trace!(body = %body, "Zammad API response");

        serde_json::from_str(&body).map_err(ZammadError::Serialization)
    }

    /// Converts a non-success response into `ZammadError::Api`.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        path: &str,
        response: reqwest::Response,
    ) -> ZammadError {
        let body = response.text().await.unwrap_or_default();
        let detail = ZammadError::sanitize_message(&extract_error_detail(&body), &self.token);

        tracing::warn!(status = %status, path = %path, "Zammad API returned an error");

        ZammadError::api(status.as_u16(), detail, path)
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Lists one page of tickets with expanded references.
    ///
    /// Items are returned in the order the server provides.
    pub async fn list_tickets(&self, page: u32, per_page: u32) -> Result<Vec<Ticket>, ZammadError> {
        let query = encode_query(&[
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("expand", "true".to_string()),
        ]);
        self.request(&format!("/api/v1/tickets?{}", query), RequestOptions::get())
            .await
    }

    /// Gets a single ticket with expanded references.
    ///
    /// # Errors
    ///
    /// A missing ticket surfaces as `ZammadError::Api` with status 404.
    pub async fn get_ticket(&self, id: u64) -> Result<Ticket, ZammadError> {
        self.request(
            &format!("/api/v1/tickets/{}?expand=true", id),
            RequestOptions::get(),
        )
        .await
    }

    /// Searches tickets. The query syntax is interpreted by the server.
    pub async fn search_tickets(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Ticket>, ZammadError> {
        let query = encode_query(&[
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("expand", "true".to_string()),
        ]);
        self.request(
            &format!("/api/v1/tickets/search?{}", query),
            RequestOptions::get(),
        )
        .await
    }

    /// Updates a ticket, sending only the fields set in `update`.
    pub async fn update_ticket(&self, id: u64, update: &UpdateTicket) -> Result<Ticket, ZammadError> {
        let body = serde_json::to_value(update)?;
        self.request(
            &format!("/api/v1/tickets/{}", id),
            RequestOptions::with_body(Method::PUT, body),
        )
        .await
    }

    /// Closes a ticket by setting its state to "closed".
    pub async fn close_ticket(&self, id: u64) -> Result<Ticket, ZammadError> {
        self.update_ticket(id, &UpdateTicket::new().with_state("closed"))
            .await
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Lists the articles of a ticket with expanded references.
    pub async fn list_articles(&self, ticket_id: u64) -> Result<Vec<Article>, ZammadError> {
        self.request(
            &format!("/api/v1/ticket_articles/by_ticket/{}?expand=true", ticket_id),
            RequestOptions::get(),
        )
        .await
    }

    /// Creates an article. Unset optional fields receive defaults.
    pub async fn create_article(&self, params: CreateArticle) -> Result<Article, ZammadError> {
        let body = serde_json::to_value(params.resolve())?;
        self.request(
            "/api/v1/ticket_articles",
            RequestOptions::with_body(Method::POST, body),
        )
        .await
    }

    // ========================================================================
    // Users & states
    // ========================================================================

    /// Gets the user the token belongs to.
    ///
    /// A successful call proves the token is valid.
    pub async fn current_user(&self) -> Result<User, ZammadError> {
        self.request("/api/v1/users/me", RequestOptions::get()).await
    }

    /// Lists the ticket state catalog.
    pub async fn ticket_states(&self) -> Result<Vec<TicketState>, ZammadError> {
        self.request("/api/v1/ticket_states", RequestOptions::get())
            .await
    }
}

impl TicketLister for ZammadClient {
    async fn list_tickets(&self, page: u32, per_page: u32) -> Result<Vec<Ticket>, ZammadError> {
        ZammadClient::list_tickets(self, page, per_page).await
    }
}

/// Form-urlencodes query pairs in order (spaces become `+`).
fn encode_query(pairs: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Extracts a human-readable detail from an error body.
///
/// Prefers a string `error` field, then a string `message` field, then the
/// raw body text.
fn extract_error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|v| v.as_str())
                .or_else(|| json.get("message").and_then(|v| v.as_str()))
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
