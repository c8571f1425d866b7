use cracky_api::{normalize_chat_url, ChatRequest, CrackyApiClient, CrackyApiConfig};

#[test]
fn http_request_builds_chat_endpoint() {
    let config = CrackyApiConfig::new().with_base_url("http://localhost:8000/api");
    let client = CrackyApiClient::new(config).expect("client");
    let request = ChatRequest::new("What's in my cart?");

    let http_request = client
        .build_request(&request, Some("demo_token_alice_1"))
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(
        http_request.url().as_str(),
        normalize_chat_url("http://localhost:8000/api")
    );
    assert_eq!(http_request.method(), "POST");
    assert_eq!(
        http_request
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
        Some("Bearer demo_token_alice_1")
    );

    let body = http_request.body().and_then(|body| body.as_bytes());
    let body: serde_json::Value =
        serde_json::from_slice(body.expect("json body")).expect("body parses");
    assert_eq!(body["message"], "What's in my cart?");
}

#[test]
fn http_request_without_token_has_no_authorization_header() {
    let client = CrackyApiClient::new(CrackyApiConfig::new()).expect("client");
    let http_request = client
        .build_request(&ChatRequest::new("hello"), None)
        .expect("build request")
        .build()
        .expect("request");

    assert!(http_request.headers().get("authorization").is_none());
}
