pub mod codec;
pub mod file;
pub mod sink;

pub use codec::{decode_inbound, encode_outbound, DecodeError};
pub use file::AudioFile;
pub use sink::{AudioSink, CHUNK_SAMPLE_RATE};
