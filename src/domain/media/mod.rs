//! Media value objects shared by the session core and the encoder adapters.

mod audio;
mod container;
mod duration;
mod video;

pub use audio::AudioFormat;
pub use container::ContainerKind;
pub use duration::Duration;
pub use video::{VideoFormat, VideoFrame, BYTES_PER_PIXEL};
