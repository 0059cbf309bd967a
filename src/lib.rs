//! media-embed - Offline media preprocessing for firmware images
//!
//! Prepares audio clips and image frame sequences for embedding into an
//! embedded application's binary:
//! 1. Audio: decode a compressed clip, transform it, and emit its raw PCM
//!    bytes as a C array with accessor functions
//! 2. Frames: list a directory of image frames and emit the linker symbol
//!    declarations, a lookup table and an optional build fragment
//!
//! Every run is synchronous, single-threaded and idempotent: identical inputs
//! produce identical outputs.

pub mod audio;
pub mod cli;
pub mod error;
pub mod frames;
pub mod scan;
pub mod symbol;

pub use error::{MediaError, Result};
