// Integration tests for the wire message types
//
// These tests verify inbound frame classification, field defaults, and
// the shape of the one outbound envelope.

use convai_relay::{AudioFile, EventKind, OutboundAudio, ServerFrame};

#[test]
fn test_full_frame_parses() {
    let frame: ServerFrame = serde_json::from_str(
        r#"{
            "type": "agent_response",
            "is_final": false,
            "audio_event": {"audio_base_64": "AAAA"},
            "user_transcription_event": {"user_transcript": "hello"},
            "agent_response_event": {"agent_response": "hi there"}
        }"#,
    )
    .unwrap();

    assert_eq!(frame.kind(), EventKind::AgentResponse);
    assert_eq!(frame.audio_payload(), Some("AAAA"));
    assert_eq!(frame.user_transcript(), "hello");
    assert_eq!(frame.agent_response(), "hi there");
    assert!(!frame.is_final());
}

#[test]
fn test_empty_frame_is_unrecognized() {
    let frame: ServerFrame = serde_json::from_str("{}").unwrap();

    assert_eq!(frame.kind(), EventKind::Unrecognized);
    assert_eq!(frame.audio_payload(), None);
    assert!(!frame.is_final());
}

#[test]
fn test_unknown_type_is_unrecognized() {
    let frame: ServerFrame =
        serde_json::from_str(r#"{"type": "conversation_initiation_metadata"}"#).unwrap();

    assert_eq!(frame.kind(), EventKind::Unrecognized);
}

#[test]
fn test_ping_frame() {
    let frame: ServerFrame = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();

    assert_eq!(frame.kind(), EventKind::Ping);
}

#[test]
fn test_transcript_defaults_to_na() {
    // Discriminator present but the nested event is missing its field.
    let frame: ServerFrame =
        serde_json::from_str(r#"{"type": "user_transcript", "user_transcription_event": {}}"#)
            .unwrap();
    assert_eq!(frame.user_transcript(), "N/A");

    let frame: ServerFrame = serde_json::from_str(r#"{"type": "agent_response"}"#).unwrap();
    assert_eq!(frame.agent_response(), "N/A");
}

#[test]
fn test_empty_audio_payload_is_absent() {
    let frame: ServerFrame =
        serde_json::from_str(r#"{"audio_event": {"audio_base_64": ""}}"#).unwrap();

    assert_eq!(frame.audio_payload(), None);
}

#[test]
fn test_is_final_without_type() {
    let frame: ServerFrame = serde_json::from_str(r#"{"is_final": true}"#).unwrap();

    assert_eq!(frame.kind(), EventKind::Unrecognized);
    assert!(frame.is_final());
}

#[test]
fn test_unrecognized_fields_are_ignored() {
    let frame: ServerFrame = serde_json::from_str(
        r#"{"type": "ping", "ping_event": {"event_id": 7}, "extra": [1, 2, 3]}"#,
    )
    .unwrap();

    assert_eq!(frame.kind(), EventKind::Ping);
}

#[test]
fn test_outbound_envelope_shape() {
    let clip = AudioFile {
        path: "input.wav".to_string(),
        duration_seconds: 2.0,
        sample_rate: 44100,
        channels: 1,
        samples: vec![1, -2, 3],
    };

    let envelope = OutboundAudio::from_clip(&clip);
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["sample_rate"], 44100);
    assert!(json["audio"].is_string());
    assert!(!json["audio"].as_str().unwrap().is_empty());
}
