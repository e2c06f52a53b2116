//! Connection handler: the read loop for one websocket.
//!
//! The loop is deliberately sequential — every reply for an inbound frame
//! is written before the next frame is read, so outputs can never reorder
//! or interleave within a connection.

use crate::session::{Session, SessionError};
use axum::extract::ws::{Message, WebSocket};
use sttrelay_core::{decode_message, error_payload};

/// Wire text for protocol-level rejects. The detailed reason goes to the
/// log only.
const BAD_MESSAGE: &str = "bad message";

pub struct ConnectionHandler {
    session: Session,
    conn_id: u64,
}

impl ConnectionHandler {
    pub fn new(session: Session, conn_id: u64) -> Self {
        Self { session, conn_id }
    }

    /// Replies for one inbound text frame, in processing order. A frame
    /// carrying both audio and an end marker yields two replies.
    pub fn handle_frame(&mut self, raw: &str) -> Vec<String> {
        let mut replies = Vec::with_capacity(2);

        for envelope in decode_message(raw) {
            match self.session.process(envelope) {
                Ok(event) => {
                    tracing::trace!(
                        conn_id = self.conn_id,
                        is_final = event.is_final(),
                        "result"
                    );
                    replies.push(event.into_payload());
                }
                Err(SessionError::Protocol(e)) => {
                    tracing::debug!(conn_id = self.conn_id, "rejected message: {e}");
                    replies.push(error_payload(BAD_MESSAGE));
                }
                Err(SessionError::Recognizer(e)) => {
                    // Engine hiccup: surfaced to the client, session kept.
                    tracing::warn!(conn_id = self.conn_id, "recognizer failure: {e}");
                    replies.push(error_payload(&e.to_string()));
                }
                Err(SessionError::Closed) => {
                    tracing::debug!(conn_id = self.conn_id, "envelope after close dropped");
                    break;
                }
            }
        }
        replies
    }

    /// Drive the connection until the peer closes or I/O fails. Consumes
    /// the handler; the session (and its recognizer) is released on return.
    pub async fn run(mut self, mut socket: WebSocket) {
        tracing::info!(conn_id = self.conn_id, "connection established");

        while let Some(frame) = socket.recv().await {
            let frame = match frame {
                Ok(f) => f,
                Err(e) => {
                    tracing::debug!(conn_id = self.conn_id, "read failed: {e}");
                    break;
                }
            };

            let replies = match frame {
                Message::Text(raw) => self.handle_frame(&raw),
                // The wire contract is text JSON; a binary frame is one
                // bad message, not a reason to drop the connection.
                Message::Binary(_) => vec![error_payload(BAD_MESSAGE)],
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => break,
            };

            for payload in replies {
                if let Err(e) = socket.send(Message::Text(payload)).await {
                    tracing::debug!(conn_id = self.conn_id, "write failed: {e}");
                    self.session.close();
                    return;
                }
            }
        }

        self.session.close();
        tracing::info!(
            conn_id = self.conn_id,
            frames = self.session.frames(),
            utterances = self.session.utterances(),
            "connection closed"
        );
    }
}
