use base64::Engine;
use thiserror::Error;

/// Failure decoding one inbound audio payload.
///
/// Always recovered by the caller: the chunk is dropped and the receive
/// loop continues.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("audio payload is {0} bytes, not a whole number of 16-bit samples")]
    Misaligned(usize),
}

/// Encode a sample buffer for the outbound wire message.
///
/// Samples are serialized as raw little-endian bytes in their stored
/// layout (no resampling, no bit-depth conversion), then base64-encoded
/// for embedding in a JSON text frame.
pub fn encode_outbound(samples: &[i16]) -> String {
    let pcm_bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    base64::engine::general_purpose::STANDARD.encode(pcm_bytes)
}

/// Decode an inbound base64 audio payload into 16-bit signed
/// little-endian PCM samples.
pub fn decode_inbound(text: &str) -> Result<Vec<i16>, DecodeError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(text)?;

    if bytes.len() % 2 != 0 {
        return Err(DecodeError::Misaligned(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(samples)
}
