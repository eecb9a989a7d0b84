//! Bit-string encoder and tree-walking decoder.
//!
//! Encoding concatenates codewords in input order. Decoding walks the tree
//! from the root, one bit per step, and emits a symbol every time it lands on
//! a leaf. A valid bit string always leaves the cursor back at the root.

use crate::error::{Error, Result};
use crate::tree::{CodeTable, CodeTree, Node};
use tracing::debug;

/// Encode `text` as the concatenation of each byte's codeword.
///
/// # Errors
/// `Error::UnknownSymbol` if a byte has no codeword in `codes`.
pub fn encode_text(text: &[u8], codes: &CodeTable) -> Result<String> {
    let mut bits = String::with_capacity(text.len());

    for (position, &symbol) in text.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(Error::UnknownSymbol { symbol, position })?;
        bits.push_str(code);
    }

    debug!(symbols = text.len(), bits = bits.len(), "encoded text");
    Ok(bits)
}

/// Decode `bits` by replaying root-to-leaf walks through `tree`.
///
/// # Errors
/// - `Error::TreeNotBuilt` if `tree` is `None`
/// - `Error::InvalidBit` on a character other than '0' or '1'
/// - `Error::TraversalFailure` if a step has nowhere to go
/// - `Error::BitStringMismatch` if the input ends mid-codeword
pub fn decode_text(bits: &str, tree: Option<&CodeTree>) -> Result<Vec<u8>> {
    let tree = tree.ok_or(Error::TreeNotBuilt)?;
    let root = tree.root();
    let mut out = Vec::new();

    // The root is also the only leaf: each '0' is one whole codeword.
    if let Some(&Node::Leaf { symbol, .. }) = tree.node(root) {
        out.reserve(bits.len());
        for (position, ch) in bits.chars().enumerate() {
            match ch {
                '0' => out.push(symbol),
                '1' => return Err(Error::TraversalFailure { position }),
                found => return Err(Error::InvalidBit { position, found }),
            }
        }
        return Ok(out);
    }

    let mut cursor = root;
    let mut pending = 0usize;

    for (position, ch) in bits.chars().enumerate() {
        let go_right = match ch {
            '0' => false,
            '1' => true,
            found => return Err(Error::InvalidBit { position, found }),
        };

        let next = match tree.node(cursor) {
            Some(&Node::Internal { left, right, .. }) => {
                if go_right {
                    right
                } else {
                    left
                }
            }
            _ => return Err(Error::TraversalFailure { position }),
        };

        match tree.node(next) {
            Some(&Node::Leaf { symbol, .. }) => {
                out.push(symbol);
                cursor = root;
                pending = 0;
            }
            Some(Node::Internal { .. }) => {
                cursor = next;
                pending += 1;
            }
            None => return Err(Error::TraversalFailure { position }),
        }
    }

    if cursor != root {
        return Err(Error::BitStringMismatch { pending });
    }

    debug!(bits = bits.len(), symbols = out.len(), "decoded bit string");
    Ok(out)
}
