//! Mismatch actions against the admin API: ignore, issue tracking, issue cleanup.
//!
//! Requests are built here and handed to a [`Transport`] unchanged. There is
//! no validation, retry, or caching; the server owns the semantics.

use reqwest::Url;
use serde::Serialize;

use crate::error::Error;
use crate::types::IgnoreLevel;

/// HTTP methods the admin API endpoints are called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Remove a resource.
    Delete,
    /// Create or trigger.
    Post,
}

impl Method {
    /// The method name as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        return match self {
            Self::Delete => "DELETE",
            Self::Post => "POST",
        };
    }
}

/// One admin API call, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRequest {
    /// HTTP method.
    pub method: Method,
    /// Query parameters in send order.
    pub query: Vec<(String, String)>,
    /// Unencoded path segments, admin API prefix first.
    pub segments: Vec<String>,
}

impl ActionRequest {
    /// Full URL against a server origin. Each segment is percent-encoded on
    /// its own, so a segment can never add path levels or a query string.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidServer` if the origin is not an absolute base URL.
    pub fn url(&self, origin: &str) -> Result<Url, Error> {
        let invalid = |reason: String| return Error::InvalidServer { reason, server: origin.to_string() };
        let mut url = Url::parse(origin).map_err(|e| return invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| return invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        return Ok(url);
    }
}

/// Status and body of an admin API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Response body as text.
    pub body: String,
    /// HTTP status code.
    pub status: u16,
}

impl ActionResponse {
    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        return self.status >= 200 && self.status < 300;
    }
}

/// Sends action requests somewhere.
pub trait Transport {
    /// Send one request and return whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn send(&self, request: &ActionRequest) -> Result<ActionResponse, Error>;
}

/// Blocking HTTP transport to the admin API.
pub struct HttpTransport {
    /// Shared connection pool.
    client: reqwest::blocking::Client,
    /// Scheme, host, and port of the server.
    origin: String,
}

impl HttpTransport {
    /// Create a transport for the given server origin.
    pub fn new(origin: &str) -> Self {
        return Self { client: reqwest::blocking::Client::new(), origin: origin.to_string() };
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ActionRequest) -> Result<ActionResponse, Error> {
        let url = request.url(&self.origin)?;
        log::info!("{} {url}", request.method.as_str());
        let builder = match request.method {
            Method::Delete => self.client.delete(url.clone()),
            Method::Post => self.client.post(url.clone()),
        };
        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        log::debug!("{} {url} -> {status}", request.method.as_str());
        return Ok(ActionResponse { body, status });
    }
}

/// Builds requests for the mismatch action endpoints.
pub struct MismatchActionClient<'a> {
    /// Admin API base path.
    admin_api: &'a str,
}

impl<'a> MismatchActionClient<'a> {
    /// Delete every issue attached to a mismatch.
    pub fn delete_all_issues(&self, mismatch_id: i64) -> ActionRequest {
        return ActionRequest {
            method: Method::Post,
            query: Vec::new(),
            segments: self.segments(&["spotcheck", "mismatch", &mismatch_id.to_string(), "delete"]),
        };
    }

    /// Set the ignore level of a mismatch.
    pub fn ignore(&self, mismatch_id: i64, level: IgnoreLevel) -> ActionRequest {
        return ActionRequest {
            method: Method::Post,
            query: vec![("ignoreLevel".to_string(), level.tag().to_string())],
            segments: self.segments(&["spotcheck", "mismatches", &mismatch_id.to_string(), "ignore"]),
        };
    }

    /// Create a client rooted at the admin API base path.
    pub const fn new(admin_api: &'a str) -> Self {
        return Self { admin_api };
    }

    /// Attach a mismatch to a tracking issue.
    pub fn track(&self, mismatch_id: i64, issue_id: &str) -> ActionRequest {
        return ActionRequest {
            method: Method::Post,
            query: Vec::new(),
            segments: self.issue_segments(mismatch_id, issue_id),
        };
    }

    /// Detach a mismatch from a tracking issue.
    pub fn untrack(&self, mismatch_id: i64, issue_id: &str) -> ActionRequest {
        return ActionRequest {
            method: Method::Delete,
            query: Vec::new(),
            segments: self.issue_segments(mismatch_id, issue_id),
        };
    }

    /// Segments shared by attach and detach.
    fn issue_segments(&self, mismatch_id: i64, issue_id: &str) -> Vec<String> {
        return self.segments(&["spotcheck", "mismatches", &mismatch_id.to_string(), "issue", issue_id]);
    }

    /// Admin API prefix segments followed by `rest`.
    fn segments(&self, rest: &[&str]) -> Vec<String> {
        return self
            .admin_api
            .split('/')
            .filter(|s| return !s.is_empty())
            .chain(rest.iter().copied())
            .map(str::to_string)
            .collect();
    }
}

/// Send a request and treat any non-2xx answer as a rejection.
///
/// # Errors
///
/// Returns transport errors unchanged, or `Error::ActionRejected` for a non-2xx status.
pub fn perform(transport: &dyn Transport, origin: &str, request: &ActionRequest) -> Result<ActionResponse, Error> {
    let response = transport.send(request)?;
    if !response.is_success() {
        return Err(Error::ActionRejected {
            body: response.body,
            method: request.method.as_str().to_string(),
            status: response.status,
            url: request.url(origin)?.to_string(),
        });
    }
    return Ok(response);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct RecordingTransport {
        sent: RefCell<Vec<ActionRequest>>,
        status: u16,
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: &ActionRequest) -> Result<ActionResponse, Error> {
            self.sent.borrow_mut().push(request.clone());
            return Ok(ActionResponse { body: "{\"success\":false}".to_string(), status: self.status });
        }
    }

    #[test]
    fn ignore_request() {
        let request = MismatchActionClient::new("/api/3/admin").ignore(42, IgnoreLevel::IgnoreUntilResolved);
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url("http://localhost:8080/").unwrap().as_str(),
            "http://localhost:8080/api/3/admin/spotcheck/mismatches/42/ignore?ignoreLevel=IGNORE_UNTIL_RESOLVED"
        );
    }

    #[test]
    fn track_and_untrack_share_a_path() {
        let client = MismatchActionClient::new("/api/3/admin");
        let attach = client.track(7, "11235");
        let detach = client.untrack(7, "11235");

        assert_eq!(
            attach.url("http://localhost").unwrap().path(),
            "/api/3/admin/spotcheck/mismatches/7/issue/11235"
        );
        assert_eq!(attach.segments, detach.segments);
        assert_eq!(attach.method, Method::Post);
        assert_eq!(detach.method, Method::Delete);
        assert!(attach.query.is_empty());
    }

    #[test]
    fn delete_all_issues_request() {
        let request = MismatchActionClient::new("/admin").delete_all_issues(9);
        assert_eq!(request.url("http://localhost").unwrap().path(), "/admin/spotcheck/mismatch/9/delete");
    }

    #[test]
    fn issue_id_is_encoded_as_one_segment() {
        let request = MismatchActionClient::new("/admin").track(1, "OL 12/34?x=1");
        let url = request.url("http://localhost").unwrap();

        assert_eq!(url.as_str(), "http://localhost/admin/spotcheck/mismatches/1/issue/OL%2012%2F34%3Fx=1");
        assert!(url.query().is_none());
        assert_eq!(url.path_segments().map(Iterator::count), Some(6));
    }

    #[test]
    fn origin_path_prefix_is_kept() {
        let request = MismatchActionClient::new("/api/3/admin").delete_all_issues(9);
        let url = request.url("https://example.org/legislation/").unwrap();
        assert_eq!(url.as_str(), "https://example.org/legislation/api/3/admin/spotcheck/mismatch/9/delete");
    }

    #[test]
    fn malformed_origin_is_rejected() {
        let request = MismatchActionClient::new("/admin").delete_all_issues(9);
        let err = request.url("localhost:8080").unwrap_err();
        assert!(matches!(err, Error::InvalidServer { .. }));
    }

    #[test]
    fn perform_passes_request_through() {
        let transport = RecordingTransport { sent: RefCell::new(Vec::new()), status: 200 };
        let request = MismatchActionClient::new("/admin").delete_all_issues(9);

        let response = perform(&transport, "http://localhost", &request).unwrap();
        assert!(response.is_success());
        assert_eq!(transport.sent.borrow().as_slice(), [request]);
    }

    #[test]
    fn perform_rejects_non_success() {
        let transport = RecordingTransport { sent: RefCell::new(Vec::new()), status: 404 };
        let request = MismatchActionClient::new("/admin").track(1, "2");

        let err = perform(&transport, "http://localhost", &request).unwrap_err();
        assert!(matches!(err, Error::ActionRejected { status: 404, .. }));
        assert_eq!(transport.sent.borrow().len(), 1);
    }
}
