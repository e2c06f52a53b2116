use crate::recognizer_trait::Recognizer;
use sttrelay_core::RecognizerError;

/// Deterministic engine for tests and wiring demos. Transcribes nothing;
/// instead it reports how many 16-bit samples were fed in the current
/// utterance, in the same native-JSON shapes a real engine would use.
pub struct NullRecognizer {
    utterance_samples: usize,
    total_chunks: usize,
    /// When set, `accept_waveform` signals a boundary once the current
    /// utterance reaches this many samples.
    boundary_after_samples: Option<usize>,
}

impl NullRecognizer {
    pub fn new() -> Self {
        Self {
            utterance_samples: 0,
            total_chunks: 0,
            boundary_after_samples: None,
        }
    }

    pub fn total_chunks(&self) -> usize {
        self.total_chunks
    }

    fn hypothesis(&self) -> String {
        if self.utterance_samples == 0 {
            String::new()
        } else {
            format!("{} samples", self.utterance_samples)
        }
    }
}

impl Default for NullRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for NullRecognizer {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError> {
        self.boundary_after_samples = config
            .get("boundary_after_samples")
            .and_then(|v| v.as_integer())
            .map(|n| n as usize);
        Ok(())
    }

    fn accept_waveform(&mut self, pcm: &[u8]) -> Result<bool, RecognizerError> {
        self.utterance_samples += pcm.len() / 2;
        self.total_chunks += 1;
        tracing::trace!(
            chunk = self.total_chunks,
            utterance_samples = self.utterance_samples,
            "null engine fed"
        );
        Ok(self
            .boundary_after_samples
            .is_some_and(|limit| self.utterance_samples >= limit))
    }

    fn partial_result(&mut self) -> Result<String, RecognizerError> {
        Ok(serde_json::json!({ "partial": self.hypothesis() }).to_string())
    }

    fn final_result(&mut self) -> Result<String, RecognizerError> {
        let payload = serde_json::json!({ "text": self.hypothesis() }).to_string();
        self.utterance_samples = 0;
        Ok(payload)
    }
}
