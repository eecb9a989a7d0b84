//! Compression session: composes the analyzer, tree builder, codec and
//! container, and remembers the results of the last operation.
//!
//! # Thread Safety
//!
//! A `Session` is plain owned state with no internal locking. Share it across
//! threads only behind external synchronization, or use one per caller.
//!
//! State is replaced only when an operation succeeds; a failed call leaves the
//! previous table, tree and counters in place.

use crate::codec::{decode_text, encode_text};
use crate::container::{self, Layout};
use crate::error::{Error, Result};
use crate::fileio;
use crate::frequency::{analyze, FrequencyTable};
use crate::report::Report;
use crate::tree::{CodeTable, CodeTree};
use std::path::Path;
use tracing::{debug, info, warn};

/// Stateful front end to the engine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    layout: Layout,
    frequencies: FrequencyTable,
    tree: Option<CodeTree>,
    codes: Option<CodeTable>,
    encoded: String,
    original_symbols: u64,
    encoded_bits: u64,
}

impl Session {
    /// Create a session that writes text-layout artifacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that writes artifacts in `layout`.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Frequency table from the last operation.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Code tree from the last encode/compress/decompress, if any.
    pub fn tree(&self) -> Option<&CodeTree> {
        self.tree.as_ref()
    }

    /// Code table from the last encode/compress/decompress, if any.
    pub fn codes(&self) -> Option<&CodeTable> {
        self.codes.as_ref()
    }

    /// Bit string from the last encode/compress/decompress.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Count the symbols of `text` and make that the current table.
    ///
    /// Clears the cached tree, which no longer matches the table.
    pub fn analyze(&mut self, text: &[u8]) -> &FrequencyTable {
        self.frequencies = analyze(text);
        self.original_symbols = text.len() as u64;
        self.tree = None;
        self.codes = None;
        self.encoded.clear();
        self.encoded_bits = 0;
        &self.frequencies
    }

    /// Build a code for `text` and encode it, caching every intermediate.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `text` is empty.
    pub fn encode(&mut self, text: &[u8]) -> Result<&str> {
        let (frequencies, tree, codes, bits) = encode_pipeline(text)?;
        self.store(frequencies, tree, codes, bits, text.len());
        Ok(&self.encoded)
    }

    /// Decode `bits` with the cached tree.
    ///
    /// # Errors
    /// `Error::TreeNotBuilt` before any successful encode/compress/decompress,
    /// plus every decoder error.
    pub fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        decode_text(bits, self.tree.as_ref())
    }

    /// Decode the cached bit string and check it reproduces `original`.
    pub fn verify_roundtrip(&self, original: &[u8]) -> Result<bool> {
        Ok(self.decode(&self.encoded)? == original)
    }

    /// Compress `input` into an artifact in the session layout.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `input` is empty.
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let (frequencies, tree, codes, bits) = encode_pipeline(input)?;
        let artifact = container::serialize_with(self.layout, &frequencies, &bits)?;

        debug!(
            input_bytes = input.len(),
            artifact_bytes = artifact.len(),
            "compressed"
        );
        self.store(frequencies, tree, codes, bits, input.len());
        Ok(artifact)
    }

    /// Reconstruct the original bytes from an artifact of either layout.
    ///
    /// # Errors
    /// Every container and decoder error, plus `Error::BitStringMismatch`
    /// when the payload decodes cleanly but not to the symbol counts the
    /// artifact's table records.
    pub fn decompress(&mut self, artifact: &[u8]) -> Result<Vec<u8>> {
        let (frequencies, bits) = container::deserialize(artifact)?;
        let tree = CodeTree::build(&frequencies)?;
        let text = decode_text(&bits, Some(&tree))?;
        check_counts(&frequencies, &text)?;

        debug!(
            artifact_bytes = artifact.len(),
            output_bytes = text.len(),
            "decompressed"
        );
        let codes = tree.code_table();
        self.store(frequencies, tree, codes, bits, text.len());
        Ok(text)
    }

    /// Compress the file at `input` into `output`.
    ///
    /// `output` is written only if compression succeeds.
    pub fn compress_file(&mut self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let data = fileio::read_bytes(input)?;
        let artifact = self.compress(&data)?;
        fileio::write_bytes(output, &artifact)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            original_bytes = data.len(),
            compressed_bytes = artifact.len(),
            "compressed file"
        );
        Ok(())
    }

    /// Decompress the artifact at `input` into `output`.
    ///
    /// `output` is written only if decompression succeeds.
    pub fn decompress_file(&mut self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let artifact = fileio::read_bytes(input)?;
        let text = self.decompress(&artifact)?;
        fileio::write_bytes(output, &text)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            output_bytes = text.len(),
            "decompressed file"
        );
        Ok(())
    }

    /// Snapshot of the current statistics.
    pub fn report(&self) -> Report {
        Report {
            frequencies: self.frequencies.clone(),
            original_symbols: self.original_symbols,
            encoded_bits: self.encoded_bits,
        }
    }

    fn store(
        &mut self,
        frequencies: FrequencyTable,
        tree: CodeTree,
        codes: CodeTable,
        bits: String,
        original_symbols: usize,
    ) {
        self.frequencies = frequencies;
        self.tree = Some(tree);
        self.codes = Some(codes);
        self.encoded_bits = bits.len() as u64;
        self.encoded = bits;
        self.original_symbols = original_symbols as u64;
    }
}

/// analyze → build → code table → encode.
fn encode_pipeline(text: &[u8]) -> Result<(FrequencyTable, CodeTree, CodeTable, String)> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    let frequencies = analyze(text);
    let tree = CodeTree::build(&frequencies)?;
    let codes = tree.code_table();
    let bits = encode_text(text, &codes)?;
    Ok((frequencies, tree, codes, bits))
}

/// A payload with flipped bits usually still decodes; its symbol counts give
/// it away.
fn check_counts(frequencies: &FrequencyTable, text: &[u8]) -> Result<()> {
    let decoded = analyze(text);
    if decoded.total() == frequencies.total() && decoded.positive().eq(frequencies.positive()) {
        return Ok(());
    }

    warn!(
        expected_symbols = frequencies.total(),
        decoded_symbols = decoded.total(),
        "decoded text disagrees with the stored frequency table"
    );
    Err(Error::BitStringMismatch { pending: 0 })
}
