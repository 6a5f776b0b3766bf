use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;

use super::frequency::FrequencyTable;
use super::tree::{CodeTree, Node};
use super::Symbol;

/// A single prefix code word. Bits live in `bits` most significant bit
/// first; `len` is the number of valid bits. Code words grow as needed, a
/// heavily skewed alphabet can push them past any fixed machine word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeWord {
    bits: Vec<u8>,
    len: usize,
}

impl CodeWord {
    pub fn new() -> CodeWord {
        CodeWord {
            bits: Vec::new(),
            len: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let bit_index = self.len % 8;
        if bit_index == 0 {
            self.bits.push(0);
        }
        if bit {
            let last = self.bits.len() - 1;
            self.bits[last] |= 0b10000000_u8.rotate_right(bit_index as u32);
        }
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes, padded with zeros past `len` bits.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn bit(&self, index: usize) -> bool {
        self.bits[index / 8] & 0b10000000_u8.rotate_right((index % 8) as u32) > 0
    }

    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|index| self.bit(index))
    }
}

impl Default for CodeWord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            let character = if bit { '1' } else { '0' };
            write!(f, "{}", character)?;
        }
        Ok(())
    }
}

/// Symbol to code word mapping generated from a code tree. Prefix-free by
/// construction, every code at least one bit long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: HashMap<S, CodeWord>,
}

impl<S: Symbol> CodeTable<S> {
    /// Walk the tree and record the path to every leaf, 0 for left and 1
    /// for right. The lone symbol of a single leaf tree gets the fixed
    /// one bit code 0.
    pub fn from_tree(tree: &CodeTree<S>) -> CodeTable<S> {
        let mut codes = HashMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                let mut code = CodeWord::new();
                code.push_bit(false);
                codes.insert(*symbol, code);
            }
            root => fill_codes(&mut codes, root, CodeWord::new()),
        }
        CodeTable { codes }
    }

    pub fn code(&self, symbol: &S) -> Option<&CodeWord> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, S, CodeWord> {
        self.codes.iter()
    }

    /// Number of payload bits a message with the given frequencies packs
    /// into under this table.
    pub fn total_encoded_bits(&self, frequencies: &FrequencyTable<S>) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, &weight)| match self.codes.get(symbol) {
                Some(code) => weight * code.len() as u64,
                None => 0,
            })
            .sum()
    }
}

fn fill_codes<S: Symbol>(codes: &mut HashMap<S, CodeWord>, node: &Node<S>, prefix: CodeWord) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push_bit(false);
            fill_codes(codes, left, left_prefix);
            let mut right_prefix = prefix;
            right_prefix.push_bit(true);
            fill_codes(codes, right, right_prefix);
        }
    }
}
