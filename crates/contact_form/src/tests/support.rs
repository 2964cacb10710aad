use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, routing::post, Form, Router};
use tokio::{net::TcpListener, sync::mpsc};
use url::Url;

pub(crate) type ReceivedForm = HashMap<String, String>;

#[derive(Clone)]
struct EndpointState {
    tx: mpsc::UnboundedSender<ReceivedForm>,
    status: StatusCode,
}

async fn receive_form(
    State(state): State<EndpointState>,
    Form(body): Form<ReceivedForm>,
) -> StatusCode {
    let _ = state.tx.send(body);
    state.status
}

/// Serves `POST /formResponse` answering every request with `status`.
pub(crate) async fn spawn_endpoint(
    status: StatusCode,
) -> (Url, mpsc::UnboundedReceiver<ReceivedForm>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = EndpointState { tx, status };
    let app = Router::new()
        .route("/formResponse", post(receive_form))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let url = Url::parse(&format!("http://{addr}/formResponse")).expect("endpoint url");
    (url, rx)
}

/// A URL on a port nothing listens on.
pub(crate) async fn closed_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/formResponse")).expect("endpoint url")
}
