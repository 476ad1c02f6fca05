// Integration tests for the message dispatcher
//
// These tests verify routing by discriminator, the ping short-circuit,
// audio persistence, per-frame error recovery, and the termination signal.

use anyhow::Result;
use convai_relay::{encode_outbound, AudioSink, DispatchOutcome, EventDispatcher, ServerFrame};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn dispatcher_in(dir: &Path) -> Result<EventDispatcher> {
    Ok(EventDispatcher::new(AudioSink::new(dir)?))
}

fn frame(json: &str) -> ServerFrame {
    serde_json::from_str(json).expect("test frame should parse")
}

fn output_files(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_ping_short_circuits_everything() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    // Even with audio and is_final present, a ping skips all processing.
    let payload = encode_outbound(&[1, 2, 3]);
    let outcome = dispatcher.dispatch(&frame(&format!(
        r#"{{"type": "ping", "audio_event": {{"audio_base_64": "{payload}"}}, "is_final": true}}"#
    )));

    assert_eq!(outcome, DispatchOutcome::Continue);
    assert_eq!(output_files(temp_dir.path()), 0, "Ping must not write audio");

    Ok(())
}

#[test]
fn test_audio_event_writes_one_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let samples: Vec<i16> = (0..1600).map(|i| i as i16).collect();
    let payload = encode_outbound(&samples);
    let outcome = dispatcher.dispatch(&frame(&format!(
        r#"{{"audio_event": {{"audio_base_64": "{payload}"}}}}"#
    )));

    assert_eq!(outcome, DispatchOutcome::Continue);
    assert_eq!(output_files(temp_dir.path()), 1);

    // The persisted chunk holds exactly the decoded samples.
    let entry = fs::read_dir(temp_dir.path())?.next().unwrap()?;
    let read_back: Vec<i16> = hound::WavReader::open(entry.path())?
        .into_samples::<i16>()
        .collect::<Result<_, _>>()?;
    assert_eq!(read_back, samples);

    Ok(())
}

#[test]
fn test_empty_audio_payload_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let outcome = dispatcher.dispatch(&frame(r#"{"audio_event": {"audio_base_64": ""}}"#));

    assert_eq!(outcome, DispatchOutcome::Continue);
    assert_eq!(output_files(temp_dir.path()), 0);

    Ok(())
}

#[test]
fn test_malformed_audio_is_dropped_not_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let outcome = dispatcher.dispatch(&frame(
        r#"{"audio_event": {"audio_base_64": "!!!not base64!!!"}}"#,
    ));

    assert_eq!(outcome, DispatchOutcome::Continue, "Decode failure must not terminate");
    assert_eq!(output_files(temp_dir.path()), 0, "No file for a dropped chunk");

    Ok(())
}

#[test]
fn test_transcript_frames_do_not_write_audio() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let outcome = dispatcher.dispatch(&frame(
        r#"{"type": "user_transcript", "user_transcription_event": {"user_transcript": "hello"}}"#,
    ));
    assert_eq!(outcome, DispatchOutcome::Continue);

    let outcome = dispatcher.dispatch(&frame(
        r#"{"type": "agent_response", "agent_response_event": {"agent_response": "hi"}}"#,
    ));
    assert_eq!(outcome, DispatchOutcome::Continue);

    assert_eq!(output_files(temp_dir.path()), 0);

    Ok(())
}

#[test]
fn test_is_final_terminates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let outcome = dispatcher.dispatch(&frame(r#"{"is_final": true}"#));

    assert_eq!(outcome, DispatchOutcome::Terminate);

    Ok(())
}

#[test]
fn test_is_final_false_continues() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let outcome = dispatcher.dispatch(&frame(r#"{"is_final": false}"#));

    assert_eq!(outcome, DispatchOutcome::Continue);

    Ok(())
}

#[test]
fn test_final_frame_still_writes_its_audio() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dispatcher = dispatcher_in(temp_dir.path())?;

    let payload = encode_outbound(&[7, 8, 9]);
    let outcome = dispatcher.dispatch(&frame(&format!(
        r#"{{"audio_event": {{"audio_base_64": "{payload}"}}, "is_final": true}}"#
    )));

    assert_eq!(outcome, DispatchOutcome::Terminate);
    assert_eq!(
        output_files(temp_dir.path()),
        1,
        "Audio on the final frame is persisted before termination"
    );

    Ok(())
}
