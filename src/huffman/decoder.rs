use super::tree::{CodeTree, Node};
use super::Symbol;
use crate::binary_stream::{BitReader, BitStream};
use crate::error::Error;
use crate::Result;

/// Unpacks bit streams back into symbols by walking the code tree bit by
/// bit, 0 to the left child and 1 to the right. The tree is the decode
/// structure, no inverse table is materialized.
pub struct SymbolDecoder<'a, S: Symbol> {
    tree: &'a CodeTree<S>,
}

impl<'a, S: Symbol> SymbolDecoder<'a, S> {
    pub fn new(tree: &'a CodeTree<S>) -> SymbolDecoder<'a, S> {
        SymbolDecoder { tree }
    }

    /// Decode every valid bit of the stream. Consumption stops exactly at
    /// the valid bit count, padding bits are never interpreted.
    pub fn decode(&self, stream: &BitStream) -> Result<Vec<S>> {
        let mut symbols = Vec::new();
        let mut reader = BitReader::new(stream);
        match self.tree.root() {
            Node::Leaf { symbol, .. } => {
                // lone symbol alphabet, every bit must be the fixed code 0
                while let Some(bit) = reader.next_bit() {
                    if bit {
                        return Err(Error::CorruptStream {
                            bit_position: reader.position() - 1,
                            reason: "expected the one bit code 0 of a single symbol alphabet",
                        });
                    }
                    symbols.push(*symbol);
                }
            }
            root => {
                while reader.remaining() > 0 {
                    symbols.push(Self::decode_one(root, &mut reader)?);
                }
            }
        }
        log::debug!(
            "decoded {} symbols from {} bits",
            symbols.len(),
            stream.bit_len()
        );
        Ok(symbols)
    }

    fn decode_one(root: &Node<S>, reader: &mut BitReader) -> Result<S> {
        let mut current = root;
        loop {
            let bit = match reader.next_bit() {
                Some(bit) => bit,
                None => {
                    return Err(Error::TruncatedStream {
                        bits_consumed: reader.position(),
                    })
                }
            };
            current = match current {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                // the loop returns as soon as it steps onto a leaf
                Node::Leaf { .. } => unreachable!(),
            };
            if let Node::Leaf { symbol, .. } = current {
                return Ok(*symbol);
            }
        }
    }
}
