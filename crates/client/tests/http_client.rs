mod common;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

use common::{serve, services, signed_in, Recorder};
use idealizador_client::{
    http::{HttpClient, RequestOptions},
    ClientError,
};

fn router() -> Router {
    Router::new()
        .route("/ok", get(|| async { Json(json!({ "results": [1, 2] })) }))
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/detail",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "detail": "Projeto não encontrado" }))) }),
        )
        .route(
            "/message",
            get(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "Requisição inválida" }))) }),
        )
        .route("/bare", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

fn client(services: &idealizador_client::Services, base: &str) -> HttpClient {
    HttpClient::new(reqwest::Client::new(), base, services.session.clone())
}

#[tokio::test]
async fn session_credentials_ride_on_every_request() {
    let recorder = Recorder::default();
    let base = serve(router(), &recorder).await;
    let http = client(&signed_in(&base), &base);

    let value = http
        .request("/ok", RequestOptions::get().query("mine", 1))
        .await
        .unwrap();

    assert_eq!(value, json!({ "results": [1, 2] }));
    let seen = recorder.requests().remove(0);
    assert_eq!(seen.query.as_deref(), Some("mine=1"));
    assert_eq!(seen.user_email.as_deref(), Some("ana@example.com"));
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn anonymous_requests_carry_no_credentials() {
    let recorder = Recorder::default();
    let base = serve(router(), &recorder).await;
    let (services, _) = services(&base);

    let value = client(&services, &base)
        .request("/empty", RequestOptions::get())
        .await
        .unwrap();

    assert!(value.is_null());
    let seen = recorder.requests().remove(0);
    assert_eq!(seen.user_email, None);
    assert_eq!(seen.authorization, None);
}

#[tokio::test]
async fn error_bodies_become_messages() {
    let recorder = Recorder::default();
    let base = serve(router(), &recorder).await;
    let (services, _) = services(&base);
    let http = client(&services, &base);

    let cases = [
        ("/detail", 404, "Projeto não encontrado"),
        ("/message", 400, "Requisição inválida"),
        ("/bare", 500, "500 Internal Server Error"),
    ];
    for (path, status, expected) in cases {
        let err = http.request(path, RequestOptions::get()).await.unwrap_err();
        assert_eq!(err.status(), Some(status), "{path}");
        assert_eq!(err.to_string(), expected, "{path}");
        assert!(matches!(err, ClientError::Http { .. }));
    }
}
