//! Message-building tests driven by settings documents.
//!
//! These exercise configuration, options, resolver wiring and the builder
//! pipeline together without touching the network.

use super::{init_test_env, CreateUser, GetUser};
use rest_dispatch::auth;
use rest_dispatch::config::{get_config, load_config, reset_config};
use rest_dispatch::{
    ClientConfig, HttpMethod, ReqwestExecutor, RestClient, RestError, RestOptions,
    RestOptionsConfiguration, ServiceRegistry,
};
use serde_json::{json, Value};
use serial_test::serial;
use std::sync::Arc;

fn settings() -> Value {
    json!({
        "rest-client": {
            "baseUrl": "https://api.example.com/v1",
            "defaultHeaders": {
                "Accept": "application/json",
                "X-Tenant": "public"
            },
            "headerModels": {
                "acme": { "X-Tenant": "acme", "X-Region": "eu-west" }
            },
            "serializer": { "naming": "camelCase", "ignoreNullValues": true }
        }
    })
}

fn client_for(config: &ClientConfig, options: RestOptions) -> RestClient {
    let executor = ReqwestExecutor::from_config(config).expect("client builds");
    RestClient::with_parts(options, None, Arc::new(executor))
}

fn create_user(tenant: Option<&str>) -> CreateUser {
    CreateUser {
        org: "rust lang".into(),
        user_name: "ferris".into(),
        email: None,
        tenant: tenant.map(str::to_string),
    }
}

#[test]
#[serial]
fn test_settings_drive_message_building() {
    init_test_env();
    let config = load_config(Some(settings())).unwrap();
    let client = client_for(&config, RestOptions::from_config(&config));

    let message = client.build_message(&create_user(Some("acme"))).unwrap();

    assert_eq!(message.method, HttpMethod::Post);
    assert_eq!(message.url, "https://api.example.com/v1/orgs/rust%20lang/users");
    assert_eq!(message.body.as_deref(), Some(r#"{"userName":"ferris"}"#));
    assert_eq!(message.content_type(), Some("application/json"));
    assert_eq!(message.header("Accept"), Some("application/json"));
    assert_eq!(message.header("X-Tenant"), Some("acme"));
    assert_eq!(message.header("X-Region"), Some("eu-west"));
    assert_eq!(message.header("X-Api-Version"), Some("2024-01"));
    assert_eq!(message.header("Idempotency-Key"), Some("create-ferris"));
    assert_eq!(message.header("Authorization"), None);

    reset_config();
}

#[test]
#[serial]
fn test_global_config_client() {
    init_test_env();
    load_config(Some(settings())).unwrap();
    assert_eq!(get_config().base_url, "https://api.example.com/v1");

    let client = RestClient::from_global_config().unwrap();
    let message = client.build_message(&create_user(None)).unwrap();
    assert_eq!(message.header("X-Tenant"), Some("public"));
    assert_eq!(message.header("X-Region"), None);

    reset_config();
}

#[test]
fn test_query_skips_missing_values() {
    init_test_env();
    let config = ClientConfig {
        base_url: "https://api.example.com".into(),
        ..ClientConfig::default()
    };
    let client = client_for(&config, RestOptions::from_config(&config));

    let without = client
        .build_message(&GetUser { id: 1, include_teams: None })
        .unwrap();
    assert!(without.query.is_empty());
    assert_eq!(without.full_url().unwrap().as_str(), "https://api.example.com/users/1");

    let with = client
        .build_message(&GetUser { id: 1, include_teams: Some(true) })
        .unwrap();
    assert_eq!(
        with.full_url().unwrap().as_str(),
        "https://api.example.com/users/1?include_teams=true"
    );
    assert_eq!(with.body, None);
}

#[test]
fn test_resolver_supplies_authentication() {
    init_test_env();
    let config = ClientConfig {
        base_url: "https://api.example.com".into(),
        ..ClientConfig::default()
    };
    let mut services = ServiceRegistry::new();
    services.register(auth::basic("svc", "s3cret"));

    let mut options = RestOptions::from_config(&config);
    RestOptionsConfiguration::new(services)
        .configure(Some(&mut options))
        .unwrap();

    let client = client_for(&config, options);
    let message = client
        .build_message(&GetUser { id: 9, include_teams: None })
        .unwrap();
    assert_eq!(message.header("Authorization"), Some("Basic c3ZjOnMzY3JldA=="));
}

#[test]
fn test_missing_base_url() {
    init_test_env();
    let config = ClientConfig::default();
    let client = client_for(&config, RestOptions::from_config(&config));

    let err = client
        .build_message(&GetUser { id: 1, include_teams: None })
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidUrl(_)));
}
