use crate::session::Session;
use sttrelay_core::{AppConfig, RecognizerError};
use sttrelay_recognizer::RecognizerRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state behind every connection: the engine registry plus the
/// configured engine selection. Immutable after startup — per-connection
/// recognizer state lives in each connection's own Session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    registry: RecognizerRegistry,
    engine: String,
    engine_config: toml::Value,
    next_conn_id: AtomicU64,
}

impl AppState {
    pub fn new(registry: RecognizerRegistry, engine: &str, engine_config: toml::Value) -> Self {
        Self {
            inner: Arc::new(StateInner {
                registry,
                engine: engine.to_string(),
                engine_config,
                next_conn_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn from_config(registry: RecognizerRegistry, config: &AppConfig) -> Self {
        Self::new(
            registry,
            &config.recognizer.engine,
            config.recognizer.engine_config(),
        )
    }

    pub fn engine(&self) -> &str {
        &self.inner.engine
    }

    /// Fresh session with a fresh, fully isolated recognizer instance.
    pub fn new_session(&self) -> Result<Session, RecognizerError> {
        let recognizer = self
            .inner
            .registry
            .create_initialized(&self.inner.engine, self.inner.engine_config.clone())?;
        Ok(Session::new(recognizer))
    }

    pub fn next_conn_id(&self) -> u64 {
        self.inner.next_conn_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sttrelay_core::Envelope;

    fn null_state() -> AppState {
        AppState::new(
            RecognizerRegistry::new(),
            "null",
            toml::Value::Table(Default::default()),
        )
    }

    #[test]
    fn test_new_session_per_connection() {
        let state = null_state();
        let mut a = state.new_session().unwrap();
        let mut b = state.new_session().unwrap();

        a.process(Envelope::AudioChunk(vec![0u8; 640])).unwrap();

        // B has its own recognizer; nothing leaked from A.
        let event = b.process(Envelope::EndOfUtterance).unwrap();
        let value: serde_json::Value = serde_json::from_str(event.payload()).unwrap();
        assert_eq!(value["text"], "");
    }

    #[test]
    fn test_unknown_engine_fails_per_connection() {
        let state = AppState::new(
            RecognizerRegistry::new(),
            "nonexistent",
            toml::Value::Table(Default::default()),
        );
        assert!(matches!(
            state.new_session(),
            Err(RecognizerError::EngineNotFound(_))
        ));
    }

    #[test]
    fn test_conn_ids_are_unique_and_increasing() {
        let state = null_state();
        let a = state.next_conn_id();
        let b = state.next_conn_id();
        assert!(b > a);
    }

    #[test]
    fn test_from_config_uses_configured_engine() {
        let config = AppConfig::default();
        let state = AppState::from_config(RecognizerRegistry::new(), &config);
        assert_eq!(state.engine(), "null");
        assert!(state.new_session().is_ok());
    }
}
