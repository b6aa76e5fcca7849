#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde_json::Value;

use idealizador_client::{Config, KeyValueStore, MemoryStore, Services, Session};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_email: Option<String>,
    pub authorization: Option<String>,
}

/// Everything the stub backend saw, in arrival order.
#[derive(Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn total(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn record_body(&self, path: &str, body: Value) {
        self.bodies.lock().unwrap().push((path.to_string(), body));
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn recorded(request: &Request) -> Recorded {
    Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        user_email: header(request, "x-user-email"),
        authorization: header(request, "authorization"),
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let entry = recorded(&request);
    recorder.requests.lock().unwrap().push(entry);
    next.run(request).await
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router, recorder: &Recorder) -> String {
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Services pointed at `base` for every remote, backed by a fresh memory store.
pub fn services(base: &str) -> (Services, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let services = Services::new(&Config::single_host(base), store.clone()).unwrap();
    (services, store)
}

pub fn signed_in(base: &str) -> Services {
    let (services, _) = services(base);
    services
        .session
        .save(&Session {
            email: "ana@example.com".to_string(),
            token: "tok-123".to_string(),
        })
        .unwrap();
    services
}
