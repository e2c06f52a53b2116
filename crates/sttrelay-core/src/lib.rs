pub mod config;
pub mod error;
pub mod protocol;

pub use config::{AppConfig, GeneralConfig, RecognizerConfig, ServerConfig, VoskConfig};
pub use error::{ConfigError, ProtocolError, RecognizerError};
pub use protocol::{decode_message, error_payload, Envelope, TranscriptEvent};
