//! HTTP request plumbing.
//!
//! Requests are described by plain data ([`Request`]) and executed through
//! the [`HttpTransport`] trait, so service calls can be tested against a
//! scripted transport without a server.

use crate::error::{extract_message, ClientError, TransportError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request body.
#[derive(Debug, Clone)]
pub enum Body {
    /// No body (GET, DELETE).
    None,
    /// Serialized JSON bytes.
    Json(Vec<u8>),
    /// Multipart form data, used for product uploads with images.
    Multipart(MultipartForm),
}

/// One part of a multipart form.
#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// A multipart form under construction.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A fully built HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The absolute URL.
    pub url: String,
    /// The request headers.
    pub headers: HashMap<String, String>,
    /// The request body.
    pub body: Body,
}

impl Request {
    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Body,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: Body::None,
        }
    }

    /// Add a header to the request. Setting the same header twice keeps
    /// the last value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, TransportError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| TransportError::Body(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Body::Json(bytes);
        Ok(self)
    }

    /// Set the request body as a multipart form.
    ///
    /// No Content-Type is set here; the transport supplies it together
    /// with the boundary.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Finish building.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Convert to a Result, returning an API error for non-2xx status codes.
    ///
    /// The error message comes from the body's `error` or `message` field
    /// when present.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                status: self.status,
                message: extract_message(&self.body),
            })
        }
    }
}

/// Executes built requests.
///
/// The production implementation is [`ReqwestTransport`]; tests swap in a
/// scripted one.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. with a custom timeout or proxy.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        builder = match request.body {
            Body::None => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error)?
            .to_vec();
        Ok(Response::new(status, body))
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.parts {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::Body(e.to_string()))?;
                out.part(name, file)
            }
        };
    }
    Ok(out)
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Body(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_builder_json_body() {
        #[derive(Serialize)]
        struct Payload {
            cart_code: String,
        }

        let request = RequestBuilder::new(Method::Post, "http://x/add_to_cart/")
            .json(&Payload {
                cart_code: "abc123".to_string(),
            })
            .unwrap()
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        match &request.body {
            Body::Json(bytes) => {
                let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(value["cart_code"], "abc123");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_bearer_auth_replaces_previous_token() {
        let request = RequestBuilder::new(Method::Get, "http://x/")
            .bearer_auth("stale")
            .bearer_auth("fresh")
            .build();
        assert_eq!(request.header("authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn test_request_header_case_insensitive() {
        let request = RequestBuilder::new(Method::Get, "http://x/")
            .header("X-Custom", "1")
            .build();
        assert_eq!(request.header("x-custom"), Some("1"));
        assert_eq!(request.header("X-CUSTOM"), Some("1"));
        assert_eq!(request.header("missing"), None);
    }

    #[test]
    fn test_multipart_parts() {
        let form = MultipartForm::new()
            .text("name", "Tomatoes")
            .file("image", "tomato.jpg", "image/jpeg", vec![1, 2, 3]);
        assert_eq!(form.parts.len(), 2);
        match &form.parts[1] {
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                assert_eq!(name, "image");
                assert_eq!(file_name, "tomato.jpg");
                assert_eq!(content_type, "image/jpeg");
                assert_eq!(bytes, &[1, 2, 3]);
            }
            other => panic!("expected file part, got {:?}", other),
        }
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Vec::new()).is_success());
        assert!(Response::new(204, Vec::new()).is_success());
        assert!(!Response::new(301, Vec::new()).is_success());
        assert!(!Response::new(404, Vec::new()).is_success());
    }

    #[test]
    fn test_error_for_status_extracts_backend_message() {
        let response = Response::new(404, br#"{"error": "Product not found."}"#.to_vec());
        match response.error_for_status() {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Product not found.");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_for_status_passes_success_through() {
        let response = Response::new(201, b"{}".to_vec());
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn test_response_json_decode_error() {
        let response = Response::new(200, b"not json".to_vec());
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
