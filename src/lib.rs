//! media-capture - recording sessions for emulated machine output
//!
//! This crate records the sound and picture of an emulated machine into WAV
//! (audio only) or AVI (audio plus video) files. The core is
//! [`RecordingSession`](application::RecordingSession), a small state machine
//! that owns at most one open output file and tears it down on the first
//! failed write.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Media formats, session states, configuration, and errors
//! - **Application**: The recording session, the capture use case, and port traits
//! - **Infrastructure**: WAV and AVI encoders, a synthetic machine, and the config store
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
