use std::collections::HashSet;
use std::io::Write;

use super::tree::{CodeTree, Node};
use super::Symbol;
use crate::binary_stream::{BitReader, BitStream, BitWriter};
use crate::error::Error;
use crate::Result;

/// Deepest node nesting the codebook reader accepts. Trees built from u64
/// weights stay far below this bound, the cap only stops the reader from
/// recursing into adversarial input.
pub const MAX_CODE_LENGTH: usize = 255;

/// Alphabets whose symbols have a fixed-width bit pattern on the wire.
pub trait FixedWidthSymbol: Symbol {
    const BIT_WIDTH: u32;

    fn to_wire(self) -> u64;
    fn from_wire(value: u64) -> Self;
}

impl FixedWidthSymbol for u8 {
    const BIT_WIDTH: u32 = 8;

    fn to_wire(self) -> u64 {
        self as u64
    }

    fn from_wire(value: u64) -> Self {
        value as u8
    }
}

impl FixedWidthSymbol for u16 {
    const BIT_WIDTH: u32 = 16;

    fn to_wire(self) -> u64 {
        self as u64
    }

    fn from_wire(value: u64) -> Self {
        value as u16
    }
}

impl FixedWidthSymbol for u32 {
    const BIT_WIDTH: u32 = 32;

    fn to_wire(self) -> u64 {
        self as u64
    }

    fn from_wire(value: u64) -> Self {
        value as u32
    }
}

/// Serialize a code tree in pre-order. Every internal node contributes the
/// marker bit 0 followed by its left and right subtree, every leaf the
/// marker bit 1 followed by the symbol's fixed-width pattern. Weights are
/// not transmitted, decoding never consults them.
pub fn write_codebook<S: FixedWidthSymbol>(tree: &CodeTree<S>) -> Result<BitStream> {
    let mut buffer: Vec<u8> = Vec::new();
    let bit_len;
    {
        let mut writer = BitWriter::new(&mut buffer);
        write_node(tree.root(), &mut writer)?;
        writer.flush().map_err(Error::BitWriterError)?;
        bit_len = writer.bits_written();
    }
    log::trace!(
        "serialized codebook of {} leaves into {} bits",
        tree.leaf_count(),
        bit_len
    );
    BitStream::from_parts(buffer, bit_len)
}

fn write_node<S: FixedWidthSymbol, T: Write>(
    node: &Node<S>,
    writer: &mut BitWriter<T>,
) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            writer
                .write_bits(&[0b10000000], 1)
                .map_err(Error::BitWriterError)?;
            let pattern = symbol.to_wire() << (64 - S::BIT_WIDTH);
            writer
                .write_bits(&pattern.to_be_bytes(), S::BIT_WIDTH as usize)
                .map_err(Error::BitWriterError)?;
        }
        Node::Internal { left, right, .. } => {
            writer
                .write_bits(&[0x00], 1)
                .map_err(Error::BitWriterError)?;
            write_node(left, writer)?;
            write_node(right, writer)?;
        }
    }
    Ok(())
}

/// Rebuild a code tree from its serialized form. The reconstructed tree
/// carries zero weights throughout.
pub fn read_codebook<S: FixedWidthSymbol>(stream: &BitStream) -> Result<CodeTree<S>> {
    if stream.bit_len() == 0 {
        return Err(Error::EmptyCodebook);
    }
    let mut reader = BitReader::new(stream);
    let mut seen_symbols = HashSet::new();
    let root = read_node(&mut reader, 0, &mut seen_symbols)?;
    if reader.remaining() > 0 {
        return Err(Error::MalformedCodebook(
            "unread bits after the tree was complete",
        ));
    }
    log::trace!(
        "read codebook of {} leaves from {} bits",
        seen_symbols.len(),
        reader.position()
    );
    Ok(CodeTree::from_root(root))
}

fn read_node<S: FixedWidthSymbol>(
    reader: &mut BitReader,
    depth: usize,
    seen_symbols: &mut HashSet<S>,
) -> Result<Node<S>> {
    if depth > MAX_CODE_LENGTH {
        return Err(Error::MalformedCodebook(
            "node nesting exceeds the maximum code length",
        ));
    }
    let marker = reader.next_bit().ok_or(Error::MalformedCodebook(
        "bits exhausted before the tree was complete",
    ))?;
    if marker {
        let pattern = reader.read_bits(S::BIT_WIDTH).ok_or(Error::MalformedCodebook(
            "bits exhausted inside a leaf symbol",
        ))?;
        let symbol = S::from_wire(pattern);
        if !seen_symbols.insert(symbol) {
            return Err(Error::MalformedCodebook(
                "symbol appears in more than one leaf",
            ));
        }
        Ok(Node::Leaf { symbol, weight: 0 })
    } else {
        let left = read_node(reader, depth + 1, seen_symbols)?;
        let right = read_node(reader, depth + 1, seen_symbols)?;
        Ok(Node::Internal {
            weight: 0,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}
