use crate::recognizer_trait::Recognizer;
use sttrelay_core::RecognizerError;

pub struct VoskRecognizer {
    model_path: Option<String>,
    sample_rate: u32,
}

impl VoskRecognizer {
    pub fn new() -> Self {
        Self {
            model_path: None,
            sample_rate: 16000,
        }
    }
}

impl Default for VoskRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for VoskRecognizer {
    fn name(&self) -> &str {
        "vosk"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RecognizerError::InitializationFailed(
                    "missing 'model_path' in vosk config".to_string(),
                )
            })?;
        self.model_path = Some(model_path.to_string());

        if let Some(rate) = config.get("sample_rate").and_then(|v| v.as_integer()) {
            self.sample_rate = rate as u32;
        }

        tracing::info!(
            model_path = %model_path,
            sample_rate = self.sample_rate,
            "VoskRecognizer initialized (stub — model not loaded)"
        );
        Ok(())
    }

    fn accept_waveform(&mut self, _pcm: &[u8]) -> Result<bool, RecognizerError> {
        // Stub: real endpointing deferred to when the vosk binding is wired
        Ok(false)
    }

    fn partial_result(&mut self) -> Result<String, RecognizerError> {
        Ok(serde_json::json!({ "partial": "" }).to_string())
    }

    fn final_result(&mut self) -> Result<String, RecognizerError> {
        Ok(serde_json::json!({ "text": "" }).to_string())
    }
}
