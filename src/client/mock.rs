//! Mock transport shared by dispatcher and resource tests.

use super::Client;
use crate::config::ClientConfig;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
pub(crate) struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn respond(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(response(status, body))])
    }

    pub(crate) fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub(crate) fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub(crate) fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(response(200, "{}"))
        } else {
            responses.remove(0)
        }
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

pub(crate) fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

pub(crate) fn config() -> ClientConfig {
    ClientConfig::default()
        .with_api_key("xk_test_key")
        .with_base_url(url::Url::parse("https://api.example.com").unwrap())
}

pub(crate) fn client(mock: &Arc<MockClient>) -> Client<Arc<MockClient>> {
    Client::with_transport(config(), Arc::clone(mock))
}

pub(crate) fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request has a body")).unwrap()
}

pub(crate) fn query(request: &HttpRequest) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
