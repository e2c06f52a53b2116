use sttrelay_core::RecognizerError;

/// Contract between one session and one stateful speech engine instance.
///
/// Calls are made strictly in feed order by a single owner; implementations
/// need no internal locking. Audio is raw little-endian 16-bit mono PCM at
/// the engine's configured sample rate.
pub trait Recognizer: Send {
    fn name(&self) -> &str;

    /// Must be called once before the first waveform.
    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError>;

    /// Feed one chunk. Returns `true` when the engine detected an utterance
    /// boundary on its own (endpointing).
    fn accept_waveform(&mut self, pcm: &[u8]) -> Result<bool, RecognizerError>;

    /// Native JSON payload for the best-effort hypothesis of the current
    /// utterance so far.
    fn partial_result(&mut self) -> Result<String, RecognizerError>;

    /// Native JSON payload for the committed hypothesis of the current
    /// utterance. Resets utterance state so the same instance continues
    /// with the next utterance.
    fn final_result(&mut self) -> Result<String, RecognizerError>;
}
