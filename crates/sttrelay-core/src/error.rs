use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddr(String),
}

/// Per-message faults on an established connection. Always recovered
/// locally: the client gets one error reply and the connection continues.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("message is not valid JSON or matches no known shape")]
    DecodeError,

    #[error("bad audio payload: {0}")]
    MalformedAudio(String),
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognizer initialization failed: {0}")]
    InitializationFailed(String),

    #[error("recognizer processing failed: {0}")]
    EngineFailure(String),

    #[error("recognizer engine not found: {0}")]
    EngineNotFound(String),
}
