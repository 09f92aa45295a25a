//! Length-limited Huffman code lengths from symbol frequencies.

use crate::error::{Error, Result};
use crate::table::MAX_SYMBOLS;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Computes a code length per symbol, none longer than `max_bits`.
///
/// Symbols with a zero count get length 0. The returned lengths always
/// describe a complete prefix code.
pub(crate) fn code_lengths(histogram: &[u32], max_bits: u8) -> Result<Vec<u8>> {
    if histogram.len() > MAX_SYMBOLS {
        return Err(Error::InvalidTable("histogram has more than 256 symbols"));
    }

    // Ascending by frequency; ties broken by symbol so the result is stable.
    let mut leaves: Vec<(u32, usize)> = histogram
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(symbol, &count)| (count, symbol))
        .collect();
    if leaves.len() < 2 {
        return Err(Error::SingleSymbol);
    }
    leaves.sort_unstable();

    let depths = tree_depths(&leaves);
    let counts = limit_lengths(&depths, max_bits as usize)?;

    // Least frequent symbols take the longest codes.
    let mut lengths = vec![0u8; histogram.len()];
    let mut leaf = 0;
    for bits in (1..=max_bits as usize).rev() {
        for _ in 0..counts[bits] {
            lengths[leaves[leaf].1] = bits as u8;
            leaf += 1;
        }
    }
    Ok(lengths)
}

/// Builds an unrestricted Huffman tree and returns the depth of each leaf.
fn tree_depths(leaves: &[(u32, usize)]) -> Vec<usize> {
    let n = leaves.len();
    let mut parent = vec![0usize; 2 * n - 1];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = leaves
        .iter()
        .enumerate()
        .map(|(node, &(count, _))| Reverse((count as u64, node)))
        .collect();

    let mut next = n;
    while let (Some(Reverse((wa, a))), Some(Reverse((wb, b)))) = (heap.pop(), heap.pop()) {
        parent[a] = next;
        parent[b] = next;
        heap.push(Reverse((wa + wb, next)));
        next += 1;
    }

    // Parents always have a higher index than their children.
    let root = 2 * n - 2;
    let mut depth = vec![0usize; 2 * n - 1];
    for node in (0..root).rev() {
        depth[node] = depth[parent[node]] + 1;
    }
    depth.truncate(n);
    depth
}

/// Clamps depths to `max_bits` and rebalances the per-length code counts
/// until the Kraft sum is exactly one again.
fn limit_lengths(depths: &[usize], max_bits: usize) -> Result<Vec<u32>> {
    let mut counts = vec![0u32; max_bits + 1];
    for &depth in depths {
        counts[depth.min(max_bits)] += 1;
    }

    let target = 1u64 << max_bits;
    let mut total: u64 = (1..=max_bits)
        .map(|bits| (counts[bits] as u64) << (max_bits - bits))
        .sum();

    while total > target {
        if counts[max_bits] == 0 {
            return Err(Error::InvalidTable("code length limiting failed"));
        }
        counts[max_bits] -= 1;
        for bits in (1..max_bits).rev() {
            if counts[bits] != 0 {
                counts[bits] -= 1;
                counts[bits + 1] += 2;
                break;
            }
        }
        total -= 1;
    }

    Ok(counts)
}
