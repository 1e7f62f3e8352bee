//! Input handling: key classification and multi-key sequence accumulation.

pub mod keys;
pub mod sequence;

pub use keys::{classify, KeyInput};
pub use sequence::SequenceBuffer;
