//! Per-connection incremental-recognition state machine.
//!
//! A session exclusively owns one recognizer instance for the lifetime of
//! its connection, and may carry many utterances sequentially: a final
//! result ends an utterance, not the session. `Closed` is reached only by
//! connection teardown.

use sttrelay_core::{Envelope, ProtocolError, RecognizerError, TranscriptEvent};
use sttrelay_recognizer::Recognizer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Recognizer(#[from] RecognizerError),

    #[error("session is closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Closed,
}

pub struct Session {
    recognizer: Box<dyn Recognizer>,
    state: SessionState,
    frames: u64,
    utterances: u64,
}

impl Session {
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            recognizer,
            state: SessionState::Active,
            frames: 0,
            utterances: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Audio frames accepted over the session lifetime.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Utterances finalized over the session lifetime.
    pub fn utterances(&self) -> u64 {
        self.utterances
    }

    /// Run one envelope through the state machine. Every `Ok` carries
    /// exactly one result; protocol errors leave the session Active and
    /// usable, recognizer errors leave the engine in the adapter's hands
    /// (assumed usable afterwards).
    pub fn process(&mut self, envelope: Envelope) -> Result<TranscriptEvent, SessionError> {
        if self.state == SessionState::Closed {
            return Err(SessionError::Closed);
        }

        match envelope {
            Envelope::AudioChunk(samples) => {
                if samples.is_empty() {
                    return Err(ProtocolError::MalformedAudio("empty payload".to_string()).into());
                }
                if samples.len() % 2 != 0 {
                    // Whole 16-bit samples only.
                    return Err(ProtocolError::MalformedAudio(format!(
                        "odd-length payload ({} bytes)",
                        samples.len()
                    ))
                    .into());
                }

                self.frames += 1;
                let boundary = self.recognizer.accept_waveform(&samples)?;
                if boundary {
                    self.utterances += 1;
                    Ok(TranscriptEvent::Final(self.recognizer.final_result()?))
                } else {
                    Ok(TranscriptEvent::Partial(self.recognizer.partial_result()?))
                }
            }
            Envelope::EndOfUtterance => {
                // Unconditional, even with no audio fed since the last
                // final: the adapter returns its empty/stable hypothesis.
                self.utterances += 1;
                Ok(TranscriptEvent::Final(self.recognizer.final_result()?))
            }
            Envelope::Malformed => Err(ProtocolError::DecodeError.into()),
        }
    }

    /// Connection teardown. The recognizer is released when the session is
    /// dropped; after this, every envelope is refused.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }
}
