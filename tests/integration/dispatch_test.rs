//! End-to-end dispatch against a mock HTTP server.

use super::{init_test_env, CreateUser, GetUser};
use rest_dispatch::auth;
use rest_dispatch::{
    ClientConfig, ReqwestExecutor, RestClient, RestError, RestOptions,
    RestOptionsConfiguration, SerializerOptions, ServiceRegistry,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    user_name: String,
}

fn config_for(server: &MockServer) -> ClientConfig {
    let mut header_models = HashMap::new();
    header_models.insert(
        "acme".to_string(),
        HashMap::from([("X-Tenant".to_string(), "acme".to_string())]),
    );
    ClientConfig {
        base_url: server.uri(),
        timeout: 5000,
        default_headers: HashMap::from([("Accept".to_string(), "application/json".to_string())]),
        header_models,
        serializer: SerializerOptions::web(),
        ..ClientConfig::default()
    }
}

fn client_with(config: &ClientConfig, options: RestOptions) -> RestClient {
    let executor = ReqwestExecutor::from_config(config).expect("client builds");
    RestClient::with_parts(options, None, Arc::new(executor))
}

#[tokio::test]
async fn test_get_with_query_and_json_response() {
    init_test_env();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/42"))
        .and(query_param("includeTeams", "true"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 42, "userName": "ferris"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::from_config(&config_for(&server)).unwrap();
    let user: User = client
        .send_json(&GetUser { id: 42, include_teams: Some(true) })
        .await
        .unwrap();

    assert_eq!(
        user,
        User {
            id: 42,
            user_name: "ferris".into()
        }
    );
}

#[tokio::test]
async fn test_post_with_body_headers_and_bearer() {
    init_test_env();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orgs/rust/users"))
        .and(header("Authorization", "Bearer t0ken"))
        .and(header("X-Tenant", "acme"))
        .and(header("X-Api-Version", "2024-01"))
        .and(header("Idempotency-Key", "create-ferris"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"userName": "ferris", "email": "f@rust.dev"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 7, "userName": "ferris"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let options = RestOptions::from_config(&config).with_authentication(auth::bearer("t0ken"));
    let client = client_with(&config, options);

    let request = CreateUser {
        org: "rust".into(),
        user_name: "ferris".into(),
        email: Some("f@rust.dev".into()),
        tenant: Some("acme".into()),
    };
    let context = client.send(&request).await.unwrap();

    assert_eq!(context.status(), 201);
    assert!(context.is_success());
    assert_eq!(context.serializer(), &SerializerOptions::web());
    let user: User = context.json().unwrap();
    assert_eq!(user.id, 7);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    init_test_env();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .mount(&server)
        .await;

    let client = RestClient::from_config(&config_for(&server)).unwrap();
    let request = GetUser { id: 404, include_teams: None };

    let context = client.send(&request).await.unwrap();
    assert_eq!(context.status(), 404);
    assert_eq!(context.text(), "no such user");
    let failure = context.ensure_success().unwrap_err();
    assert!(failure.message().unwrap_or_default().contains("404"));

    let err = client.send_json::<User>(&request).await.unwrap_err();
    assert!(matches!(err, RestError::Request(_)));
}

#[tokio::test]
async fn test_repeated_response_headers_are_kept() {
    init_test_env();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "session=abc")
                .append_header("Set-Cookie", "theme=dark")
                .set_body_json(json!({"id": 3, "userName": "c"})),
        )
        .mount(&server)
        .await;

    let client = RestClient::from_config(&config_for(&server)).unwrap();
    let context = client
        .send(&GetUser { id: 3, include_teams: None })
        .await
        .unwrap();

    let cookies: Vec<&str> = context.response().header_values("set-cookie").collect();
    assert_eq!(cookies, vec!["session=abc", "theme=dark"]);
}

#[tokio::test]
async fn test_resolver_provides_authentication() {
    init_test_env();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("Authorization", "Bearer resolved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "userName": "a"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut services = ServiceRegistry::new();
    services.register(auth::bearer("resolved"));
    let mut options = RestOptions::from_config(&config);
    RestOptionsConfiguration::new(services)
        .configure(Some(&mut options))
        .unwrap();

    let client = client_with(&config, options);
    let user: User = client
        .send_json(&GetUser { id: 1, include_teams: None })
        .await
        .unwrap();
    assert_eq!(user.user_name, "a");
}

#[tokio::test]
async fn test_connection_failure() {
    init_test_env();
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout: 2000,
        ..ClientConfig::default()
    };
    let client = RestClient::from_config(&config).unwrap();

    let err = client
        .send(&GetUser { id: 1, include_teams: None })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RestError::Network(_) | RestError::Timeout
    ));
}
