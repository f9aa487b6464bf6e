//! Tests for query parameter encoding.

use super::query::{append, flatten};
use serde_json::{Map, Value, json};

fn params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("params must be an object"),
    }
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

mod flattening {
    use super::*;

    #[test]
    fn scalar_values_are_stringified_in_key_order() {
        let flat = flatten(&params(json!({"q": "alice", "n": 3, "active": true})));

        assert_eq!(flat, pairs(&[("active", "true"), ("n", "3"), ("q", "alice")]));
    }

    #[test]
    fn nested_objects_use_brackets() {
        let flat = flatten(&params(json!({"filter": {"group": {"id": "g1"}}})));

        assert_eq!(flat, pairs(&[("filter[group][id]", "g1")]));
    }

    #[test]
    fn arrays_repeat_the_key() {
        let flat = flatten(&params(json!({"include": ["groups", "sessions"]})));

        assert_eq!(flat, pairs(&[("include[]", "groups"), ("include[]", "sessions")]));
    }

    #[test]
    fn null_becomes_empty_value() {
        let flat = flatten(&params(json!({"cursor": null})));

        assert_eq!(flat, pairs(&[("cursor", "")]));
    }

    #[test]
    fn empty_nested_object_contributes_nothing() {
        assert!(flatten(&params(json!({"fields": {}}))).is_empty());
    }
}

mod appending {
    use super::*;

    #[test]
    fn empty_params_leave_url_untouched() {
        let mut url = url::Url::parse("https://api.example.com/users").unwrap();
        append(&mut url, &Map::new());

        assert_eq!(url.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn pairs_are_percent_encoded() {
        let mut url = url::Url::parse("https://api.example.com/users").unwrap();
        append(&mut url, &params(json!({"fields": {"users": "name,email"}})));

        let decoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(decoded, pairs(&[("fields[users]", "name,email")]));
        assert!(url.query().unwrap().contains("%5B"));
    }
}
