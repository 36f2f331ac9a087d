//! AVI combined audio+video encoder

mod encoder;
mod riff;

pub use encoder::AviEncoder;
pub use riff::AviWriter;
