use std::io::Write;

use super::code::CodeTable;
use super::Symbol;
use crate::binary_stream::{BitStream, BitWriter};
use crate::error::Error;
use crate::Result;

/// Packs symbol sequences into bit streams through a borrowed code table.
/// Stateless apart from the borrow, so one table can serve any number of
/// encoders concurrently.
pub struct SymbolEncoder<'a, S: Symbol> {
    code_table: &'a CodeTable<S>,
}

impl<'a, S: Symbol> SymbolEncoder<'a, S> {
    pub fn new(code_table: &'a CodeTable<S>) -> SymbolEncoder<'a, S> {
        SymbolEncoder { code_table }
    }

    /// Encode into an owned bit stream. The final byte is zero padded;
    /// the stream's valid bit count marks where the data ends.
    pub fn encode(&self, symbols: &[S]) -> Result<BitStream> {
        let mut buffer: Vec<u8> = Vec::new();
        let bit_len;
        {
            let mut writer = BitWriter::new(&mut buffer);
            self.encode_into(symbols, &mut writer)?;
            writer.flush().map_err(Error::BitWriterError)?;
            bit_len = writer.bits_written();
        }
        log::debug!("encoded {} symbols into {} bits", symbols.len(), bit_len);
        BitStream::from_parts(buffer, bit_len)
    }

    /// Encode through an existing bit writer without flushing it, so
    /// several sequences can share one output stream.
    pub fn encode_into<T: Write>(&self, symbols: &[S], writer: &mut BitWriter<T>) -> Result<()> {
        for symbol in symbols {
            let code = self
                .code_table
                .code(symbol)
                .ok_or_else(|| Error::UnknownSymbol(format!("{:?}", symbol)))?;
            writer
                .write_bits(code.as_bytes(), code.len())
                .map_err(Error::BitWriterError)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::SymbolEncoder;
    use crate::error::Error;
    use crate::huffman::code::CodeTable;
    use crate::huffman::frequency::FrequencyTable;
    use crate::huffman::tree::CodeTree;

    fn build_code_table(symbols_and_frequencies: &[(u8, u64)]) -> CodeTable<u8> {
        let mut table = FrequencyTable::new();
        for &(symbol, weight) in symbols_and_frequencies {
            table.set_count(symbol, weight);
        }
        let tree = CodeTree::build(&table).expect("tree construction failed");
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn test_encode_packs_codes_msb_first() {
        // codes: a -> 00, b -> 01, c -> 1
        let code_table = build_code_table(&[(b'a', 1), (b'b', 2), (b'c', 4)]);
        let encoder = SymbolEncoder::new(&code_table);
        let stream = encoder
            .encode(&[b'c', b'a', b'b', b'c'])
            .expect("encoding failed");
        assert_eq!(stream.bit_len(), 6, "valid bit count does not match");
        assert_eq!(stream.as_bytes(), &[0b10001100]);
    }

    #[test]
    fn test_unknown_symbol_is_fatal() {
        let code_table = build_code_table(&[(b'a', 1), (b'b', 2)]);
        let encoder = SymbolEncoder::new(&code_table);
        let result = encoder.encode(&[b'a', b'z', b'b']);
        assert!(
            matches!(result, Err(Error::UnknownSymbol(_))),
            "symbol outside the table must abort the encode"
        );
    }

    #[test]
    fn test_single_symbol_alphabet_writes_one_bit_per_symbol() {
        let code_table = build_code_table(&[(b'A', 5)]);
        let encoder = SymbolEncoder::new(&code_table);
        let stream = encoder
            .encode(&[b'A', b'A', b'A'])
            .expect("encoding failed");
        assert_eq!(stream.bit_len(), 3);
        assert_eq!(stream.as_bytes(), &[0x00]);
    }

    #[test]
    fn test_encode_empty_sequence() {
        let code_table = build_code_table(&[(b'a', 1), (b'b', 2)]);
        let encoder = SymbolEncoder::new(&code_table);
        let stream = encoder.encode(&[]).expect("encoding failed");
        assert_eq!(stream.bit_len(), 0);
        assert_eq!(stream.byte_len(), 0);
    }

    #[test]
    fn test_encode_into_concatenates_sequences() {
        use crate::binary_stream::{BitStream, BitWriter};

        let code_table = build_code_table(&[(b'a', 1), (b'b', 2), (b'c', 4)]);
        let encoder = SymbolEncoder::new(&code_table);
        let mut buffer: Vec<u8> = Vec::new();
        let bit_len;
        {
            let mut writer = BitWriter::new(&mut buffer);
            encoder
                .encode_into(&[b'c', b'a'], &mut writer)
                .expect("encoding failed");
            encoder
                .encode_into(&[b'b', b'c'], &mut writer)
                .expect("encoding failed");
            use std::io::Write;
            writer.flush().expect("flushing failed");
            bit_len = writer.bits_written();
        }
        let stream = BitStream::from_parts(buffer, bit_len).expect("stream should be valid");
        assert_eq!(stream.bit_len(), 6);
        assert_eq!(stream.as_bytes(), &[0b10001100]);
    }
}
