use std::fmt::Debug;
use std::hash::Hash;

pub mod code;
pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod tree;

pub use code::{CodeTable, CodeWord};
pub use codebook::FixedWidthSymbol;
pub use decoder::SymbolDecoder;
pub use encoder::SymbolEncoder;
pub use frequency::FrequencyTable;
pub use tree::{CodeTree, Node};

/// Alphabet requirements shared by every stage of the codec. Ord keeps
/// tree construction deterministic when weights tie, Hash backs the table
/// lookups, Debug feeds error reporting.
pub trait Symbol: Copy + Eq + Hash + Ord + Debug {}

impl<T: Copy + Eq + Hash + Ord + Debug> Symbol for T {}
