//! Local stand-in for the event backend, served over real HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::protocol::{EVENTS_PATH, PARTICIPANTS_PATH};

#[derive(Clone)]
pub(crate) struct BackendStub {
    events: Value,
    participants: Value,
    fail_catalog: bool,
    fail_fetch: bool,
    catalog_requests: Arc<AtomicUsize>,
    fetch_requests: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl BackendStub {
    pub(crate) fn new() -> Self {
        Self {
            events: json!({ "events": [] }),
            participants: json!([]),
            fail_catalog: false,
            fail_fetch: false,
            catalog_requests: Arc::default(),
            fetch_requests: Arc::default(),
            last_body: Arc::default(),
        }
    }

    pub(crate) fn with_events(mut self, events: Value) -> Self {
        self.events = events;
        self
    }

    pub(crate) fn with_participants(mut self, participants: Value) -> Self {
        self.participants = participants;
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_catalog = true;
        self.fail_fetch = true;
        self
    }

    pub(crate) fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn catalog_requests(&self) -> usize {
        self.catalog_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn fetch_requests(&self) -> usize {
        self.fetch_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

async fn events(State(stub): State<BackendStub>) -> Response {
    stub.catalog_requests.fetch_add(1, Ordering::SeqCst);

    if stub.fail_catalog {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response();
    }

    Json(stub.events.clone()).into_response()
}

async fn participants(State(stub): State<BackendStub>, Json(body): Json<Value>) -> Response {
    stub.fetch_requests.fetch_add(1, Ordering::SeqCst);
    *stub.last_body.lock().unwrap() = Some(body);

    if stub.fail_fetch {
        return (StatusCode::INTERNAL_SERVER_ERROR, "participants unavailable").into_response();
    }

    Json(stub.participants.clone()).into_response()
}

/// Serve the stub on an ephemeral port and return its base URL.
pub(crate) async fn serve(stub: BackendStub) -> String {
    let app = Router::new()
        .route(EVENTS_PATH, get(events))
        .route(PARTICIPANTS_PATH, post(participants))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
