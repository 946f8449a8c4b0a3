use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::codebook::Code;

/// Per-byte occurrence counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`
    pub fn from_data(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count(data);
        table
    }

    /// Add the bytes of `data` to the counts
    pub fn count(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Raw counts indexed by byte value
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Symbols with a nonzero count, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().filter(|(_, &c)| c > 0).map(|(s, &c)| (s as u8, c))
    }

    /// Number of distinct symbols present
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of symbols counted
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of the Huffman tree
///
/// Children are indices into the owning tree's node arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8, frequency: u64 },
    Internal { frequency: u64, left: usize, right: usize },
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }
}

/// Static Huffman tree for one input
///
/// Leaves are created in ascending symbol order and internal nodes are
/// appended as they are merged, so a node's arena index is its creation
/// order. Merging always takes the two nodes with the lowest
/// `(frequency, creation order)`; the first taken becomes the left child.
/// Identical frequencies therefore always produce an identical tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree; `None` when no symbol has a nonzero count
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<Node> = frequencies
            .iter()
            .map(|(symbol, frequency)| Node::Leaf { symbol, frequency })
            .collect();

        if nodes.is_empty() {
            return None;
        }

        let mut heap: BinaryHeap<Reverse<(u64, usize)>> =
            nodes.iter().enumerate().map(|(idx, node)| Reverse((node.frequency(), idx))).collect();

        // Build tree by combining lowest frequency nodes
        while heap.len() > 1 {
            let (Some(Reverse((left_freq, left))), Some(Reverse((right_freq, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };
            let frequency = left_freq + right_freq;
            nodes.push(Node::Internal { frequency, left, right });
            heap.push(Reverse((frequency, nodes.len() - 1)));
        }

        let Reverse((_, root)) = heap.pop()?;
        Some(Self { nodes, root })
    }

    pub fn from_data(data: &[u8]) -> Option<Self> {
        Self::build(&FrequencyTable::from_data(data))
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of leaves (distinct symbols)
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Code for every leaf, found by walking from the root with an explicit stack
    pub fn leaf_codes(&self) -> Vec<(u8, Code)> {
        let mut codes = Vec::with_capacity(self.leaf_count());

        if let Node::Leaf { symbol, .. } = self.root() {
            // Lone symbol: use a 1-bit code so every symbol costs at least one bit
            codes.push((*symbol, Code::default().push(false)));
            return codes;
        }

        let mut stack = vec![(self.root, Code::default())];
        while let Some((idx, prefix)) = stack.pop() {
            match &self.nodes[idx] {
                Node::Leaf { symbol, .. } => codes.push((*symbol, prefix)),
                Node::Internal { left, right, .. } => {
                    // Right pushed first so the left subtree is visited first
                    stack.push((*right, prefix.push(true)));
                    stack.push((*left, prefix.push(false)));
                }
            }
        }

        codes
    }

    /// Depth of the deepest leaf (0 for a lone leaf)
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            match &self.nodes[idx] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let freqs = FrequencyTable::from_data(b"abracadabra");
        assert_eq!(freqs.get(b'a'), 5);
        assert_eq!(freqs.get(b'b'), 2);
        assert_eq!(freqs.get(b'z'), 0);
        assert_eq!(freqs.distinct(), 5);
        assert_eq!(freqs.total(), 11);
        let symbols: Vec<u8> = freqs.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"abcdr");
    }

    #[test]
    fn test_empty_input() {
        assert!(HuffmanTree::from_data(b"").is_none());
    }

    #[test]
    fn test_single_symbol() {
        let tree = HuffmanTree::from_data(b"zzzz").unwrap();
        assert_eq!(tree.root(), &Node::Leaf { symbol: b'z', frequency: 4 });
        assert_eq!(tree.depth(), 0);
        let codes = tree.leaf_codes();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].1.to_string(), "0");
    }

    #[test]
    fn test_two_symbols() {
        // 'b' is rarer so it is popped first and becomes the left child
        let tree = HuffmanTree::from_data(b"aab").unwrap();
        assert_eq!(tree.root().frequency(), 3);
        let codes = tree.leaf_codes();
        assert_eq!(
            codes,
            vec![(b'b', Code::parse("0").unwrap()), (b'a', Code::parse("1").unwrap())]
        );
    }

    #[test]
    fn test_tie_break_by_creation_order() {
        // All equal: leaves a, b, c, d merge as (a,b) then (c,d), then the two pairs
        let tree = HuffmanTree::from_data(b"abcd").unwrap();
        let mut codes: Vec<(u8, String)> =
            tree.leaf_codes().into_iter().map(|(s, c)| (s, c.to_string())).collect();
        codes.sort();
        assert_eq!(
            codes,
            vec![
                (b'a', "00".to_string()),
                (b'b', "01".to_string()),
                (b'c', "10".to_string()),
                (b'd', "11".to_string()),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let a = HuffmanTree::from_data(data).unwrap();
        let b = HuffmanTree::from_data(data).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.leaf_codes(), b.leaf_codes());
    }

    #[test]
    fn test_root_frequency_is_total() {
        let data = b"mississippi river";
        let tree = HuffmanTree::from_data(data).unwrap();
        assert_eq!(tree.root().frequency(), data.len() as u64);
        assert_eq!(tree.leaf_count(), FrequencyTable::from_data(data).distinct());
    }

    #[test]
    fn test_deep_tree_is_walked_iteratively() {
        // Fibonacci-like counts produce a maximally skewed tree
        let mut freqs = FrequencyTable::new();
        let (mut a, mut b) = (1u64, 1u64);
        for symbol in 0..40u8 {
            freqs.counts[symbol as usize] = a;
            let next = a + b;
            a = b;
            b = next;
        }
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(tree.depth(), 39);
        assert_eq!(tree.leaf_codes().len(), 40);
    }
}
