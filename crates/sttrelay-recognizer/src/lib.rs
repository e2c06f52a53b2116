pub mod null_engine;
pub mod recognizer_trait;
pub mod registry;
#[cfg(feature = "vosk")]
pub mod vosk_engine;

pub use null_engine::NullRecognizer;
pub use recognizer_trait::Recognizer;
pub use registry::RecognizerRegistry;
#[cfg(feature = "vosk")]
pub use vosk_engine::VoskRecognizer;
