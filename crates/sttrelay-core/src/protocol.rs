//! Wire protocol: inbound envelope decoding and outbound payloads.
//!
//! Inbound frames are UTF-8 JSON objects. `{"audio": [..bytes..]}` carries
//! raw little-endian 16-bit PCM; the presence of an `end` key (any value)
//! signals end-of-utterance. A frame may carry both, in which case the
//! audio is processed before the end marker. Outbound payloads are the
//! recognizer's native JSON forwarded verbatim, or `{"error": ...}`.

use serde_json::Value;

/// Decoded logical content of one inbound message, independent of framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// Ordered raw PCM bytes. Length validation happens in the session.
    AudioChunk(Vec<u8>),
    EndOfUtterance,
    Malformed,
}

/// Transcription output for one envelope, carrying the recognizer's
/// native JSON payload unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Partial(String),
    Final(String),
}

impl TranscriptEvent {
    pub fn payload(&self) -> &str {
        match self {
            TranscriptEvent::Partial(p) | TranscriptEvent::Final(p) => p,
        }
    }

    pub fn into_payload(self) -> String {
        match self {
            TranscriptEvent::Partial(p) | TranscriptEvent::Final(p) => p,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TranscriptEvent::Final(_))
    }
}

/// Decode one inbound text frame into envelopes, preserving audio-then-end
/// order when a frame carries both keys. Anything unparseable, or parseable
/// with neither key, yields a single `Malformed`.
pub fn decode_message(raw: &str) -> Vec<Envelope> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return vec![Envelope::Malformed],
    };
    let Some(obj) = value.as_object() else {
        return vec![Envelope::Malformed];
    };

    let mut envelopes = Vec::with_capacity(2);

    if let Some(audio) = obj.get("audio") {
        // The payload must be an array of integers 0-255; anything else
        // poisons the whole message.
        match serde_json::from_value::<Vec<u8>>(audio.clone()) {
            Ok(samples) => envelopes.push(Envelope::AudioChunk(samples)),
            Err(_) => return vec![Envelope::Malformed],
        }
    }

    // Key presence alone signals end-of-utterance; the value is ignored.
    if obj.contains_key("end") {
        envelopes.push(Envelope::EndOfUtterance);
    }

    if envelopes.is_empty() {
        envelopes.push(Envelope::Malformed);
    }
    envelopes
}

/// Outbound error payload.
pub fn error_payload(description: &str) -> String {
    serde_json::json!({ "error": description }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_audio_only() {
        let envelopes = decode_message(r#"{"audio": [0, 0, 255, 127]}"#);
        assert_eq!(envelopes, vec![Envelope::AudioChunk(vec![0, 0, 255, 127])]);
    }

    #[test]
    fn test_decode_end_only() {
        assert_eq!(
            decode_message(r#"{"end": true}"#),
            vec![Envelope::EndOfUtterance]
        );
    }

    #[test]
    fn test_decode_end_value_is_ignored() {
        for raw in [r#"{"end": null}"#, r#"{"end": 0}"#, r#"{"end": "x"}"#] {
            assert_eq!(decode_message(raw), vec![Envelope::EndOfUtterance]);
        }
    }

    #[test]
    fn test_decode_audio_and_end_preserves_order() {
        let envelopes = decode_message(r#"{"audio": [1, 2], "end": true}"#);
        assert_eq!(
            envelopes,
            vec![Envelope::AudioChunk(vec![1, 2]), Envelope::EndOfUtterance]
        );
    }

    #[test]
    fn test_decode_key_order_in_json_does_not_matter() {
        let envelopes = decode_message(r#"{"end": true, "audio": [1, 2]}"#);
        assert_eq!(
            envelopes,
            vec![Envelope::AudioChunk(vec![1, 2]), Envelope::EndOfUtterance]
        );
    }

    #[test]
    fn test_decode_not_json_is_malformed() {
        assert_eq!(decode_message("not valid json"), vec![Envelope::Malformed]);
    }

    #[test]
    fn test_decode_json_without_keys_is_malformed() {
        assert_eq!(
            decode_message(r#"{"speak": "hello"}"#),
            vec![Envelope::Malformed]
        );
    }

    #[test]
    fn test_decode_non_object_is_malformed() {
        assert_eq!(decode_message("[1, 2, 3]"), vec![Envelope::Malformed]);
        assert_eq!(decode_message("42"), vec![Envelope::Malformed]);
    }

    #[test]
    fn test_decode_audio_wrong_type_is_malformed() {
        assert_eq!(
            decode_message(r#"{"audio": "AAAA"}"#),
            vec![Envelope::Malformed]
        );
    }

    #[test]
    fn test_decode_audio_out_of_range_is_malformed() {
        assert_eq!(
            decode_message(r#"{"audio": [0, 256]}"#),
            vec![Envelope::Malformed]
        );
        assert_eq!(
            decode_message(r#"{"audio": [-1]}"#),
            vec![Envelope::Malformed]
        );
    }

    #[test]
    fn test_decode_bad_audio_poisons_end_too() {
        // A frame with a broken audio payload yields one error, not a
        // half-processed end marker.
        assert_eq!(
            decode_message(r#"{"audio": "bad", "end": true}"#),
            vec![Envelope::Malformed]
        );
    }

    #[test]
    fn test_decode_empty_audio_array_passes_through() {
        // Emptiness is a session-level rejection, not a decode failure.
        assert_eq!(
            decode_message(r#"{"audio": []}"#),
            vec![Envelope::AudioChunk(vec![])]
        );
    }

    #[test]
    fn test_error_payload_shape() {
        let payload = error_payload("bad message");
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["error"], "bad message");
    }

    #[test]
    fn test_transcript_event_accessors() {
        let partial = TranscriptEvent::Partial(r#"{"partial": "he"}"#.to_string());
        let fin = TranscriptEvent::Final(r#"{"text": "hello"}"#.to_string());
        assert!(!partial.is_final());
        assert!(fin.is_final());
        assert_eq!(partial.payload(), r#"{"partial": "he"}"#);
        assert_eq!(fin.into_payload(), r#"{"text": "hello"}"#);
    }
}
