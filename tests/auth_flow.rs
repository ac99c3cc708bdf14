//! Integration tests for the token exchange using wiremock.
//!
//! Mocks the Azure AD v1 token endpoint to verify the request shape
//! (form-encoded client-credentials grant with a `resource` field), the
//! tenant-parameterized path, and the failure classification.

use runbook_start::auth::Authenticator;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body() -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_in": "3599",
        "expires_on": "1470000000",
        "resource": "https://management.azure.com/",
        "access_token": "issued-token"
    })
}

#[tokio::test]
async fn exchange_posts_form_encoded_client_credentials() {
    let server = MockServer::start().await;

    // The mock only matches when the request is a form-encoded
    // client-credentials grant carrying the management resource; a
    // non-matching request would 404 and fail the test.
    Mock::given(method("POST"))
        .and(path("/tenant-xyz/oauth2/token"))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-app"))
        .and(body_string_contains("client_secret=p%40ss"))
        .and(body_string_contains(
            "resource=https%3A%2F%2Fmanagement.azure.com%2F",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let authenticator =
        Authenticator::with_base_url("tenant-xyz", "client-app", "p@ss", &server.uri());

    let token = authenticator
        .authenticate()
        .await
        .expect("valid exchange should yield a token");

    assert_eq!(token, "issued-token");
}

#[tokio::test]
async fn each_call_performs_a_fresh_exchange() {
    let server = MockServer::start().await;

    // No token caching: two authenticate calls mean two POSTs.
    Mock::given(method("POST"))
        .and(path("/tenant-xyz/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(2)
        .mount(&server)
        .await;

    let authenticator =
        Authenticator::with_base_url("tenant-xyz", "client-app", "p@ss", &server.uri());

    authenticator.authenticate().await.unwrap();
    authenticator.authenticate().await.unwrap();
}

#[tokio::test]
async fn rejected_credentials_fail_with_fixed_message_and_diagnostic_cause() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-xyz/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .mount(&server)
        .await;

    let authenticator =
        Authenticator::with_base_url("tenant-xyz", "client-app", "wrong", &server.uri());

    let err = authenticator
        .authenticate()
        .await
        .expect_err("401 must fail the exchange");

    assert_eq!(err.to_string(), "Error authenticating.");
    let cause = std::error::Error::source(&err).expect("cause must be chained");
    let cause = cause.to_string();
    assert!(cause.contains("401"), "cause should carry the status: {cause}");
    assert!(
        cause.contains("AADSTS7000215"),
        "cause should carry the AADSTS diagnostic: {cause}"
    );
}

#[tokio::test]
async fn undecodable_token_body_fails_authentication() {
    let server = MockServer::start().await;

    // A 200 whose body has no access_token is an invalid credential
    // response and must classify as an auth failure.
    Mock::given(method("POST"))
        .and(path("/tenant-xyz/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token_type": "Bearer"})),
        )
        .mount(&server)
        .await;

    let authenticator =
        Authenticator::with_base_url("tenant-xyz", "client-app", "p@ss", &server.uri());

    let err = authenticator
        .authenticate()
        .await
        .expect_err("a token response without access_token is invalid");

    assert_eq!(err.to_string(), "Error authenticating.");
}

#[tokio::test]
async fn unreachable_token_endpoint_fails_authentication() {
    // Nothing listens on port 9; even the transport failure surfaces as
    // the authentication error, with the cause chained.
    let authenticator =
        Authenticator::with_base_url("tenant-xyz", "client-app", "p@ss", "http://127.0.0.1:9");

    let err = authenticator
        .authenticate()
        .await
        .expect_err("connection refused must fail the exchange");

    assert_eq!(err.to_string(), "Error authenticating.");
    assert!(std::error::Error::source(&err).is_some());
}
