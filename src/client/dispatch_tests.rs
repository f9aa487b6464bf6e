//! Tests for `Client::dispatch` against a mock transport.

use super::mock::{MockClient, body_json, client, config, query, response};
use super::{API_KEY_HEADER, Client, MACHINE_TOKEN_HEADER, MEDIA_TYPE, Method, Request};
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind};
use crate::transport::{HttpError, HttpRequest};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

mod status_mapping {
    use super::*;

    #[tokio::test]
    async fn success_statuses_return_parsed_body() {
        for status in [200, 201, 202, 204] {
            let mock = Arc::new(MockClient::respond(status, r#"{"data":{"id":"1"}}"#));
            let result = client(&mock).get("users/1", Value::Null).await.unwrap();

            assert_eq!(result, json!({"data": {"id": "1"}}), "status {status}");
        }
    }

    #[tokio::test]
    async fn empty_success_body_yields_empty_object() {
        for status in [200, 201, 202, 204] {
            let mock = Arc::new(MockClient::respond(status, ""));
            let result = client(&mock).delete("users/1", Value::Null).await.unwrap();

            assert_eq!(result, json!({}), "status {status}");
        }
    }

    #[tokio::test]
    async fn whitespace_success_body_yields_empty_object() {
        let mock = Arc::new(MockClient::respond(200, " \n"));
        let result = client(&mock).get("realm", Value::Null).await.unwrap();

        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn error_statuses_map_to_kinds() {
        let cases = [
            (400, ErrorKind::Validation),
            (401, ErrorKind::Authentication),
            (403, ErrorKind::Authentication),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Api),
            (422, ErrorKind::Api),
            (429, ErrorKind::RateLimit),
            (500, ErrorKind::Server),
            (502, ErrorKind::Server),
            (599, ErrorKind::Server),
            (302, ErrorKind::Api),
            (206, ErrorKind::Api),
        ];

        for (status, expected) in cases {
            let mock = Arc::new(MockClient::respond(status, r#"{"message":"nope"}"#));
            let err = client(&mock).get("users", Value::Null).await.unwrap_err();

            assert_eq!(err.kind(), expected, "status {status}");
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.message(), "nope");
        }
    }

    #[tokio::test]
    async fn not_found_carries_body_message_and_details() {
        let mock = Arc::new(MockClient::respond(
            404,
            r#"{"message":"User not found","code":"user_not_found"}"#,
        ));
        let err = client(&mock).get("users/missing", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.message(), "User not found");
        assert_eq!(err.code(), Some("user_not_found"));
        assert_eq!(
            err.details(),
            Some(&json!({"message": "User not found", "code": "user_not_found"}))
        );
        assert_eq!(err.to_string(), "Not found: User not found (HTTP 404)");
    }

    #[tokio::test]
    async fn error_field_is_used_when_message_is_absent() {
        let mock = Arc::new(MockClient::respond(400, r#"{"error":"bad phone"}"#));
        let err = client(&mock).post("sms_auth", json!({})).await.unwrap_err();

        assert_eq!(err.message(), "bad phone");
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_generic_message() {
        let mock = Arc::new(MockClient::respond(502, "<html>Bad Gateway</html>"));
        let err = client(&mock).get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::Server(_)));
        assert_eq!(err.message(), "Request failed");
        assert_eq!(err.details(), None);
    }

    #[tokio::test]
    async fn invalid_success_body_is_a_parsing_error() {
        let mock = Arc::new(MockClient::respond(200, "not json"));
        let err = client(&mock).get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::ResponseParsing(_)));
    }
}

mod transport_failures {
    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_timeout_error() {
        let mock = Arc::new(MockClient::failing(HttpError::Timeout));
        let err = client(&mock).get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::Timeout(_)));
        assert!(err.is_retryable());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_connection_error() {
        let mock = Arc::new(MockClient::failing(HttpError::connection(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        )));
        let err = client(&mock).get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert!(err.message().contains("refused"));
    }

    #[tokio::test]
    async fn failures_are_never_retried() {
        let mock = Arc::new(MockClient::new(vec![
            Err(HttpError::Timeout),
            Ok(response(200, "{}")),
        ]));
        let _ = client(&mock).get("users", Value::Null).await;

        assert_eq!(mock.calls(), 1);
    }
}

mod credentials {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_fails_without_sending() {
        let mock = Arc::new(MockClient::respond(200, "{}"));
        let mut cfg = config();
        cfg.api_key = None;
        let client = Client::with_transport(cfg, Arc::clone(&mock));

        let err = client.get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::Authentication(_)));
        assert_eq!(err.status(), None);
        assert!(err.message().contains("API key"));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn blank_api_key_fails_without_sending() {
        let mock = Arc::new(MockClient::respond(200, "{}"));
        let client = Client::with_transport(config().with_api_key("   "), Arc::clone(&mock));

        let err = client.post("users", json!({})).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn machine_token_header_sent_only_when_configured() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock).get("realm", Value::Null).await.unwrap();
        assert!(mock.last_request().headers.get(MACHINE_TOKEN_HEADER).is_none());

        let with_token = Client::with_transport(config().with_machine_token("mt_1"), Arc::clone(&mock));
        with_token.get("realm", Value::Null).await.unwrap();
        assert_eq!(header(&mock.last_request(), MACHINE_TOKEN_HEADER), Some("mt_1"));
    }
}

mod request_building {
    use super::*;

    #[tokio::test]
    async fn default_headers_are_attached() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock).get("users", Value::Null).await.unwrap();

        let req = mock.last_request();
        assert_eq!(header(&req, API_KEY_HEADER), Some("xk_test_key"));
        assert_eq!(header(&req, "content-type"), Some(MEDIA_TYPE));
        assert_eq!(header(&req, "accept"), Some(MEDIA_TYPE));
        assert!(header(&req, "user-agent").unwrap().starts_with("xkepster-rust/"));
    }

    #[tokio::test]
    async fn caller_headers_win_on_collision() {
        let mock = Arc::new(MockClient::new(vec![]));
        let request = Request::new(Method::Get, "users")
            .with_header("Accept", "application/json")
            .with_header("X-Request-Id", "req-1");
        client(&mock).dispatch(request).await.unwrap();

        let req = mock.last_request();
        assert_eq!(header(&req, "accept"), Some("application/json"));
        assert_eq!(header(&req, "x-request-id"), Some("req-1"));
        assert_eq!(req.headers.get_all("accept").iter().count(), 1);
    }

    #[tokio::test]
    async fn invalid_caller_header_fails_without_sending() {
        let mock = Arc::new(MockClient::new(vec![]));
        let request = Request::new(Method::Get, "users").with_header("bad header", "v");
        let err = client(&mock).dispatch(request).await.unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn path_is_resolved_under_base_url() {
        let mock = Arc::new(MockClient::new(vec![]));
        let cfg = config().with_base_url(url::Url::parse("https://api.example.com/v1").unwrap());
        let client = Client::with_transport(cfg, Arc::clone(&mock));

        client.get("users/42", Value::Null).await.unwrap();
        assert_eq!(mock.last_request().url.as_str(), "https://api.example.com/v1/users/42");

        client.get("/users/42", Value::Null).await.unwrap();
        assert_eq!(mock.last_request().url.as_str(), "https://api.example.com/v1/users/42");
    }

    #[tokio::test]
    async fn empty_params_add_no_query_string() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock).get("users", json!({})).await.unwrap();

        assert_eq!(mock.last_request().url.query(), None);
    }

    #[tokio::test]
    async fn non_object_params_fail_without_sending() {
        let mock = Arc::new(MockClient::new(vec![]));
        let c = client(&mock);

        let get = c.get("users", json!(["page", 2])).await.unwrap_err();
        let delete = c.delete("users/1", json!("force")).await.unwrap_err();

        assert!(matches!(get, Error::Connection(ref m) if m.contains("JSON object")));
        assert!(matches!(delete, Error::Connection(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn nested_params_use_bracket_notation() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock)
            .get(
                "users",
                json!({"fields": {"users": "name,email"}, "page": {"size": 10}}),
            )
            .await
            .unwrap();

        let pairs = query(&mock.last_request());
        assert!(pairs.contains(&("fields[users]".to_string(), "name,email".to_string())));
        assert!(pairs.contains(&("page[size]".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn body_is_sent_as_json_with_method() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock)
            .patch("users/1", json!({"data": {"type": "users"}}))
            .await
            .unwrap();

        let req = mock.last_request();
        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(body_json(&req), json!({"data": {"type": "users"}}));
    }

    #[tokio::test]
    async fn get_sends_no_body() {
        let mock = Arc::new(MockClient::new(vec![]));
        client(&mock).get("users", Value::Null).await.unwrap();

        let req = mock.last_request();
        assert_eq!(req.method, http::Method::GET);
        assert!(req.body.is_none());
    }
}

mod lazy_transport {
    use super::*;

    static CONNECTS: AtomicUsize = AtomicUsize::new(0);

    fn counting_connector(_: &ClientConfig) -> Result<MockClient, HttpError> {
        CONNECTS.fetch_add(1, Ordering::SeqCst);
        Ok(MockClient::new(vec![]))
    }

    fn failing_connector(_: &ClientConfig) -> Result<MockClient, HttpError> {
        Err(HttpError::InvalidRequest("bad TLS config".to_string()))
    }

    #[tokio::test]
    async fn transport_is_built_once_under_concurrency() {
        let client = Arc::new(Client::with_connector(config(), counting_connector));
        assert!(!client.is_connected());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.get("users", Value::Null).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(client.is_connected());
        assert_eq!(CONNECTS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connector_failure_is_a_connection_error() {
        let client = Client::with_connector(config(), failing_connector);
        let err = client.get("users", Value::Null).await.unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert!(!client.is_connected());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = Client::with_connector(config(), failing_connector);
        let debug = format!("{client:?}");

        assert!(!debug.contains("xk_test_key"));
        assert!(debug.contains("connected: false"));
    }
}
