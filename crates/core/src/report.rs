//! Compression statistics for the last session operation.
//!
//! A [`Report`] is a snapshot: it owns a copy of the frequency table and the
//! counters, so it stays valid after the session moves on.

use crate::frequency::FrequencyTable;

/// Summary of the most recent analyze/encode/compress/decompress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Frequency table the code was built from
    pub frequencies: FrequencyTable,

    /// Number of symbols (bytes) in the original text
    pub original_symbols: u64,

    /// Number of bits in the encoded bit string
    pub encoded_bits: u64,
}

impl Report {
    /// Size of the original text in bits, at eight bits per symbol.
    pub fn original_bits(&self) -> u64 {
        self.original_symbols * 8
    }

    /// Compute compression ratio (encoded bits / original bits).
    ///
    /// Returns `None` when there is no original text.
    pub fn ratio(&self) -> Option<f64> {
        if self.original_symbols == 0 {
            None
        } else {
            Some(self.encoded_bits as f64 / self.original_bits() as f64)
        }
    }

    /// Mean codeword length in bits per symbol.
    pub fn average_code_len(&self) -> Option<f64> {
        if self.original_symbols == 0 {
            None
        } else {
            Some(self.encoded_bits as f64 / self.original_symbols as f64)
        }
    }

    /// Shannon entropy of the frequency table in bits per symbol.
    pub fn entropy_bits(&self) -> f64 {
        self.frequencies.entropy_bits()
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Character Frequencies ===");
        for (symbol, count) in self.frequencies.iter() {
            println!("{:>6} -> {}", display_symbol(symbol), count);
        }
        println!();

        println!("=== Compression ===");
        println!("Original characters: {}", self.original_symbols);
        println!("Original bits (8 per char): {}", self.original_bits());
        println!("Encoded bits: {}", self.encoded_bits);
        match self.ratio() {
            Some(ratio) => println!("Compression ratio (encoded/original): {:.4}", ratio),
            None => println!("Compression ratio (encoded/original): n/a"),
        }
        if let Some(avg) = self.average_code_len() {
            println!("Average code length: {:.3} bits (entropy {:.3})", avg, self.entropy_bits());
        }
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    ///
    /// `ratio` is omitted when it is undefined.
    pub fn export_text(&self) -> String {
        let mut text = format!(
            "symbols={}\n\
             original_symbols={}\n\
             original_bits={}\n\
             encoded_bits={}\n",
            self.frequencies.len(),
            self.original_symbols,
            self.original_bits(),
            self.encoded_bits,
        );
        if let Some(ratio) = self.ratio() {
            text.push_str(&format!("ratio={:.4}\n", ratio));
        }
        text
    }
}

/// Printable form of a byte: itself when graphic, an escape otherwise.
pub fn display_symbol(symbol: u8) -> String {
    match symbol {
        b'\0' => "\\0".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        b' ' => "' '".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => format!("0x{:02x}", s),
    }
}
