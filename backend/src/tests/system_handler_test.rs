use axum::{Router, body::Body, http::{Request, StatusCode, header}, routing::get as get_route};
use tower_http::catch_panic::CatchPanicLayer;

use crate::tests::common::{FakeLLMClient, get, send, test_app, test_app_with, test_config};

#[tokio::test]
async fn test_health_reports_provider_configuration() {
    let response = get(test_app(FakeLLMClient::answering("unused")), "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["provider_configured"], true);
    assert_eq!(json["openai_configured"], true);

    let json = get(test_app(FakeLLMClient::unconfigured()), "/api/health").await.json();
    assert_eq!(json["provider_configured"], false);
    assert_eq!(json["openai_configured"], false);
}

#[tokio::test]
async fn test_info_describes_the_application() {
    let json = get(test_app(FakeLLMClient::answering("unused")), "/api/info").await.json();

    assert_eq!(json["app_name"], "Juriste Virtuel");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["features"].as_array().map(Vec::len), Some(4));
    assert!(json["disclaimer"].as_str().unwrap().contains("avis juridique"));
}

#[tokio::test]
async fn test_index_serves_json_to_api_clients() {
    let response = get(test_app(FakeLLMClient::answering("unused")), "/").await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["status"], "active");
    assert_eq!(json["endpoints"]["chat"], "/api/chat");
    assert_eq!(json["endpoints"]["health"], "/api/health");
}

#[tokio::test]
async fn test_index_serves_html_to_browsers() {
    let request = Request::get("/")
        .header(header::ACCEPT, "text/html,application/xhtml+xml;q=0.9")
        .body(Body::empty())
        .unwrap();
    let response = send(test_app(FakeLLMClient::answering("unused")), request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("content-type").is_some_and(|c| c.starts_with("text/html")));
    assert!(response.text().contains("<form"));
}

#[tokio::test]
async fn test_legal_pages_render_markdown() {
    for (uri, title) in [
        ("/privacy_policy", "Politique de Confidentialité"),
        ("/legal_notice", "Mentions Légales"),
        ("/terms", "Conditions d'Utilisation"),
    ] {
        let response = get(test_app(FakeLLMClient::answering("unused")), uri).await;

        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        let html = response.text();
        assert!(html.contains(&format!("<title>{} - Juriste Virtuel</title>", title)), "{}", uri);
        assert!(html.contains("<h2>"), "{} content not rendered", uri);
    }
}

#[tokio::test]
async fn test_missing_legal_source_renders_placeholder() {
    let mut config = test_config();
    config.content.dir = "no-such-dir".to_string();
    let response = get(test_app_with(config, FakeLLMClient::answering("unused")), "/terms").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("<p>Contenu non disponible.</p>"));
}

#[tokio::test]
async fn test_unknown_route_returns_not_found_json() {
    let response = get(test_app(FakeLLMClient::answering("unused")), "/api/unknown").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let json = response.json();
    assert_eq!(json["error"], "Endpoint non trouvé.");
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let response = get(test_app(FakeLLMClient::answering("unused")), "/static/style.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("--primary"));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let json = get(test_app(FakeLLMClient::answering("unused")), "/api-docs/openapi.json").await.json();

    for path in ["/api/chat", "/ask", "/api/feedback", "/api/health", "/api/chat/history"] {
        assert!(json["paths"].get(path).is_some(), "{} missing from OpenAPI", path);
    }
}

async fn boom() -> &'static str {
    panic!("boom")
}

#[tokio::test]
async fn test_panic_becomes_internal_error() {
    let app = Router::new().route("/boom", get_route(boom)).layer(CatchPanicLayer::custom(crate::handle_panic));
    let response = get(app, "/boom").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json();
    assert_eq!(json["error"], "Erreur interne du serveur.");
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!response.text().contains("boom"));
}
