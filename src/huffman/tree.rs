use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use super::frequency::FrequencyTable;
use super::Symbol;
use crate::error::Error;
use crate::Result;

/// Node of a prefix code tree. Internal nodes own their children outright;
/// there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S: Symbol> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.depth().max(right.depth()) + 1,
        }
    }
}

/// Prefix code tree over an alphabet, built by greedily merging the two
/// lightest subtrees until one root remains.
pub struct CodeTree<S: Symbol> {
    root: Node<S>,
    leaf_count: usize,
}

struct HeapEntry<S: Symbol> {
    weight: u64,
    sequence: u64,
    node: Node<S>,
}

impl<S: Symbol> Ord for HeapEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl<S: Symbol> PartialOrd for HeapEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> PartialEq for HeapEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl<S: Symbol> Eq for HeapEntry<S> {}

impl<S: Symbol> CodeTree<S> {
    /// Build the tree for a frequency table.
    ///
    /// Ties are broken by seeding the heap in ascending (weight, symbol)
    /// order and giving every later merge the next sequence number, so
    /// identical tables always produce identical trees.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<CodeTree<S>> {
        if frequencies.is_empty() {
            return Err(Error::EmptyFrequencyTable);
        }
        let mut leaves: Vec<(S, u64)> = frequencies
            .iter()
            .map(|(&symbol, &weight)| (symbol, weight))
            .collect();
        leaves.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        let leaf_count = leaves.len();
        let mut heap = BinaryHeap::new();
        let mut next_sequence = 0;
        for (symbol, weight) in leaves {
            heap.push(Reverse(HeapEntry {
                weight,
                sequence: next_sequence,
                node: Node::Leaf { symbol, weight },
            }));
            next_sequence += 1;
        }
        // merge nodes until none left
        while heap.len() > 1 {
            let Reverse(first) = heap.pop().unwrap();
            let Reverse(second) = heap.pop().unwrap();
            let weight = first.weight + second.weight;
            heap.push(Reverse(HeapEntry {
                weight,
                sequence: next_sequence,
                node: Node::Internal {
                    weight,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            }));
            next_sequence += 1;
        }
        let Reverse(root_entry) = heap.pop().unwrap();
        let tree = CodeTree {
            root: root_entry.node,
            leaf_count,
        };
        log::debug!(
            "built code tree with {} leaves and depth {}",
            tree.leaf_count,
            tree.depth()
        );
        Ok(tree)
    }

    pub(crate) fn from_root(root: Node<S>) -> CodeTree<S> {
        let leaf_count = root.leaf_count();
        CodeTree { root, leaf_count }
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Weight of the root, which equals the total of the source table.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of node levels, counting a lone leaf as 1.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

const BOX_DRAWINGS_DOUBLE_HORIZONTAL: &str = "═";
const SPACE: &str = " ";

// Node & Tree visualization
impl<S: Symbol> Node<S> {
    fn get_string(&self) -> Vec<String> {
        match self {
            Node::Leaf { symbol, weight } => vec![format!("(s:{:?},w:{})", symbol, weight)],
            Node::Internal { left, right, .. } => {
                let left_box: Vec<String> = left.get_string();
                let right_box: Vec<String> = right.get_string();
                let left_width = left_box[0].chars().count();
                let right_width = right_box[0].chars().count();
                let mut result: Vec<String> = Vec::new();

                result.push(format!(
                    "{}•{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));
                result.push(format!(
                    "{}║{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));

                let left_pos = (left_box[0].chars().position(|c| c != ' ').unwrap() * 2
                    + left_box[0].trim().chars().count())
                    / 2;
                let right_pos = (right_box[0].chars().position(|c| c != ' ').unwrap() * 2
                    + right_box[0].trim().chars().count())
                    / 2;
                result.push(format!(
                    "{}╔{}╩{}╗{}",
                    SPACE.repeat(left_pos),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(left_width - left_pos - 1),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(right_pos),
                    SPACE.repeat(right_width - right_pos - 1)
                ));

                let left_depth = left_box.len();
                let right_depth = right_box.len();
                for i in 0..std::cmp::max(left_depth, right_depth) {
                    let mut left_str = SPACE.repeat(left_width);
                    let mut right_str = SPACE.repeat(right_width);
                    if i < left_depth {
                        left_str = left_box[i].clone();
                    }
                    if i < right_depth {
                        right_str = right_box[i].clone();
                    }
                    result.push(format!("{} {}", left_str, right_str));
                }
                result
            }
        }
    }
}

impl<S: Symbol> fmt::Display for CodeTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strs = self.root.get_string();
        for s in strs.iter() {
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}
