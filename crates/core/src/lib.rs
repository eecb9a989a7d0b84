//! huffpack-core: Huffman prefix-code compression engine
//!
//! This library derives an optimal prefix-free code from byte frequencies,
//! encodes data into a bit string, and reconstructs the exact input from the
//! bit string plus the frequency table.
//!
//! # Architecture
//!
//! The pipeline is split along clear module boundaries:
//! - `frequency`: symbol counting
//! - `tree`: greedy code tree construction and codeword derivation
//! - `codec`: bit-string encoder and tree-walking decoder
//! - `bits`: packing bit strings into bytes
//! - `container`: artifact serialization and parsing
//! - `fileio`: whole-file reads and atomic writes
//! - `report`: compression statistics
//! - `session`: stateful orchestrator tying the above together
//!
//! # Example
//! ```
//! use huffpack_core::Session;
//!
//! let mut session = Session::new();
//! let artifact = session.compress(b"abracadabra").unwrap();
//! assert_eq!(session.decompress(&artifact).unwrap(), b"abracadabra");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and returned to the caller
//! - **All or nothing**: outputs are buffered in memory and written only on success
//! - **Deterministic**: the same input always yields the same artifact

pub mod bits;
pub mod codec;
pub mod container;
pub mod error;
pub mod fileio;
pub mod frequency;
pub mod report;
pub mod session;
pub mod tree;

// Re-export commonly used types
pub use codec::{decode_text, encode_text};
pub use container::{deserialize, serialize, Layout};
pub use error::{Error, FormatError, Result};
pub use frequency::{analyze, FrequencyTable};
pub use report::Report;
pub use session::Session;
pub use tree::{CodeTable, CodeTree, Node};

/// Compress `input` into a text-layout artifact.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    Session::new().compress(input)
}

/// Reconstruct the original bytes from an artifact.
pub fn decompress(artifact: &[u8]) -> Result<Vec<u8>> {
    Session::new().decompress(artifact)
}
