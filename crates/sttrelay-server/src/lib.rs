//! Streaming speech-to-text relay server.
//!
//! One websocket route; every accepted connection gets a fresh Session
//! owning a fresh recognizer instance, driven by an independent task.

pub mod handler;
pub mod session;
pub mod state;

pub use handler::ConnectionHandler;
pub use session::{Session, SessionError, SessionState};
pub use state::AppState;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let conn_id = state.next_conn_id();
    match state.new_session() {
        Ok(session) => {
            ws.on_upgrade(move |socket| ConnectionHandler::new(session, conn_id).run(socket))
        }
        Err(e) => {
            // Fatal for this client only; the accept loop keeps serving.
            tracing::error!(conn_id, "failed to create recognizer: {e}");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new().route("/", get(ws_handler)).with_state(state)
}
