//! Tests for the run module.

use super::*;
use serde_json::json;

mod run_error {
    use super::*;

    #[test]
    fn invalid_param_displays_input() {
        let error = RunError::InvalidParam("page".to_string());
        assert_eq!(error.to_string(), "Invalid parameter 'page': expected 'key=value'");
    }

    #[test]
    fn api_error_is_transparent() {
        let error = RunError::from(xkepster::Error::Timeout("Request timed out".to_string()));
        assert_eq!(error.to_string(), "Request timed out: Request timed out");
    }

    #[test]
    fn missing_secret_names_the_env_var() {
        assert!(
            RunError::MissingWebhookSecret
                .to_string()
                .contains("XKEPSTER_WEBHOOK_SECRET")
        );
    }
}

mod params {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Map<String, Value>, RunError> {
        let raw: Vec<String> = raw.iter().map(ToString::to_string).collect();
        parse_params(&raw)
    }

    #[test]
    fn json_values_are_parsed() {
        let params = parse(&["size=10", "active=true", r#"page={"number":2}"#]).unwrap();

        assert_eq!(params["size"], json!(10));
        assert_eq!(params["active"], json!(true));
        assert_eq!(params["page"], json!({"number": 2}));
    }

    #[test]
    fn other_values_stay_strings() {
        let params = parse(&["q=ada lovelace", "fields=name,email", "empty="]).unwrap();

        assert_eq!(params["q"], json!("ada lovelace"));
        assert_eq!(params["fields"], json!("name,email"));
        assert_eq!(params["empty"], json!(""));
    }

    #[test]
    fn only_first_equals_splits() {
        let params = parse(&["filter=a=b"]).unwrap();

        assert_eq!(params["filter"], json!("a=b"));
    }

    #[test]
    fn missing_separator_or_key_is_rejected() {
        assert!(matches!(parse(&["size"]), Err(RunError::InvalidParam(_))));
        assert!(matches!(parse(&["=10"]), Err(RunError::InvalidParam(_))));
    }
}

mod headers {
    use super::*;

    #[test]
    fn equals_form() {
        assert_eq!(
            parse_header("X-Request-Id=abc").unwrap(),
            ("X-Request-Id".to_string(), "abc".to_string())
        );
    }

    #[test]
    fn colon_form_trims_whitespace() {
        assert_eq!(
            parse_header("Accept:  application/json ").unwrap(),
            ("Accept".to_string(), "application/json".to_string())
        );
    }

    #[test]
    fn first_separator_wins() {
        assert_eq!(
            parse_header("Authorization: Bearer a=b").unwrap(),
            ("Authorization".to_string(), "Bearer a=b".to_string())
        );
    }

    #[test]
    fn no_separator_is_rejected() {
        assert!(matches!(parse_header("Accept"), Err(RunError::InvalidHeader(_))));
        assert!(matches!(parse_header(": value"), Err(RunError::InvalidHeader(_))));
    }
}

mod request_building {
    use super::*;

    #[test]
    fn builds_full_request() {
        let request = build_request(
            Method::Patch,
            "users/1".to_string(),
            Some(r#"{"data":{"type":"users"}}"#),
            &["include=groups".to_string()],
            &["X-Request-Id: r1".to_string()],
        )
        .unwrap();

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "users/1");
        assert_eq!(request.body, Some(json!({"data": {"type": "users"}})));
        assert_eq!(request.params["include"], json!("groups"));
        assert_eq!(request.headers, vec![("X-Request-Id".to_string(), "r1".to_string())]);
    }

    #[test]
    fn invalid_body_is_rejected() {
        let result = build_request(Method::Post, "users".to_string(), Some("{oops"), &[], &[]);

        assert!(matches!(result, Err(RunError::InvalidBody(_))));
    }
}

mod webhook_commands {
    use super::*;
    use std::io::Write;
    use xkepster::config::Cli;

    fn config(secret: Option<&str>) -> ValidatedConfig {
        let mut args = vec!["xkepster".to_string()];
        if let Some(secret) = secret {
            args.push("--webhook-secret".to_string());
            args.push(secret.to_string());
        }
        args.push("sign-webhook".to_string());
        let cli = Cli::parse_from_iter(args);
        ValidatedConfig::from_raw(&cli, None).unwrap()
    }

    #[test]
    fn verifier_requires_secret() {
        assert!(matches!(verifier(&config(None)), Err(RunError::MissingWebhookSecret)));
        assert!(verifier(&config(Some("s3cret"))).unwrap().has_secret());
    }

    #[test]
    fn verify_returns_payload_for_signed_body() {
        let verifier = verifier(&config(Some("s3cret"))).unwrap();
        let body = serde_json::to_vec(&json!({
            "type": "otp",
            "recipient": "+15550100",
            "code": "123456",
            "timestamp": 1_700_000_000,
            "validity_seconds": 300
        }))
        .unwrap();
        let signature = verifier.sign(&body).unwrap();

        let payload = verify(&verifier, &signature, &body, Some(WebhookEventType::Otp)).unwrap();

        assert_eq!(payload.event_type(), WebhookEventType::Otp);
    }

    #[test]
    fn verify_rejects_bad_signature() {
        let verifier = verifier(&config(Some("s3cret"))).unwrap();

        let result = verify(&verifier, "abc123", b"{}", None);

        assert!(matches!(
            result,
            Err(RunError::Api(xkepster::Error::WebhookVerification(_)))
        ));
    }

    #[tokio::test]
    async fn read_body_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"type\":\"otp\"}").unwrap();

        let body = read_body(Some(file.path())).await.unwrap();

        assert_eq!(body, b"{\"type\":\"otp\"}");
    }

    #[tokio::test]
    async fn read_body_reports_missing_file() {
        let result = read_body(Some(Path::new("/nonexistent/xkepster/body.json"))).await;

        assert!(matches!(result, Err(RunError::ReadBody { .. })));
    }
}
