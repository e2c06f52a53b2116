use crate::recognizer_trait::Recognizer;
use sttrelay_core::RecognizerError;
use std::collections::HashMap;

/// Factory map from engine name to constructor. Built once at startup and
/// shared read-only across connections; every `create` call yields a fresh,
/// fully independent engine instance.
pub struct RecognizerRegistry {
    factories: HashMap<String, fn() -> Box<dyn Recognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || {
            Box::new(crate::null_engine::NullRecognizer::new())
        });
        #[cfg(feature = "vosk")]
        registry.register("vosk", || {
            Box::new(crate::vosk_engine::VoskRecognizer::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn Recognizer>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Recognizer>, RecognizerError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| RecognizerError::EngineNotFound(name.to_string()))
    }

    /// Create and initialize in one step; this is what the server uses per
    /// accepted connection.
    pub fn create_initialized(
        &self,
        name: &str,
        config: toml::Value,
    ) -> Result<Box<dyn Recognizer>, RecognizerError> {
        let mut engine = self.create(name)?;
        engine.initialize(config)?;
        Ok(engine)
    }

    pub fn list_engines(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for RecognizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
