mod common;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use common::{serve, services, Recorder};
use idealizador_client::{
    controllers::{LoginController, LoginForm, Page},
    session::LEGACY_TOKEN_KEY,
    KeyValueStore, Session,
};

fn auth_router(recorder: &Recorder) -> Router {
    let recorder = recorder.clone();
    Router::new().route(
        "/login",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.record_body("/login", body.clone());
                if body["password"] == "segredo" {
                    (StatusCode::OK, Json(json!({ "access_token": "tok-abc" })))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "detail": "Credenciais inválidas" })),
                    )
                }
            }
        }),
    )
}

#[tokio::test]
async fn successful_login_stores_session_and_redirects() {
    let recorder = Recorder::default();
    let base = serve(auth_router(&recorder), &recorder).await;
    let (services, store) = services(&base);
    let session = services.session.clone();

    let outcome = LoginController::new(services)
        .submit(&LoginForm {
            email: " ana@example.com ".into(),
            password: "segredo".into(),
        })
        .await;

    assert_eq!(outcome.redirect, Some(Page::Home));
    assert!(!outcome.is_error());
    assert_eq!(
        session.get(),
        Some(Session {
            email: "ana@example.com".into(),
            token: "tok-abc".into(),
        })
    );
    assert_eq!(store.get(LEGACY_TOKEN_KEY).as_deref(), Some("tok-abc"));
    assert_eq!(
        recorder.bodies("/login"),
        vec![json!({ "email": "ana@example.com", "password": "segredo" })]
    );
}

#[tokio::test]
async fn rejected_login_shows_server_detail() {
    let recorder = Recorder::default();
    let base = serve(auth_router(&recorder), &recorder).await;
    let (services, _) = services(&base);
    let session = services.session.clone();

    let outcome = LoginController::new(services)
        .submit(&LoginForm {
            email: "ana@example.com".into(),
            password: "errada".into(),
        })
        .await;

    assert!(outcome.is_error());
    assert_eq!(outcome.redirect, None);
    assert_eq!(
        outcome.notice.map(|n| n.message).as_deref(),
        Some("Erro: Credenciais inválidas")
    );
    assert_eq!(session.get(), None);
}

#[tokio::test]
async fn blank_credentials_never_reach_the_server() {
    let recorder = Recorder::default();
    let base = serve(auth_router(&recorder), &recorder).await;
    let (services, _) = services(&base);

    let outcome = LoginController::new(services)
        .submit(&LoginForm {
            email: "ana@example.com".into(),
            password: "   ".into(),
        })
        .await;

    assert_eq!(
        outcome.notice.map(|n| n.message).as_deref(),
        Some("Informe e-mail e senha.")
    );
    assert_eq!(recorder.total(), 0);
}

#[tokio::test]
async fn unreachable_server_reports_connection_error() {
    let (services, _) = services("http://127.0.0.1:1");

    let outcome = LoginController::new(services)
        .submit(&LoginForm {
            email: "ana@example.com".into(),
            password: "segredo".into(),
        })
        .await;

    assert_eq!(
        outcome.notice.map(|n| n.message).as_deref(),
        Some("Erro de conexão com o servidor.")
    );
}
