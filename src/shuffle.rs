//! Shuffling algorithms.
//!
//! Every algorithm is a plain function over a sequence and a random number
//! generator, so a seeded generator always yields the same ordering.
//! [`ShuffleMethod`] selects one of them through a fixed lookup table.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Riffle passes used when none are configured.
pub const DEFAULT_RIFFLE_PASSES: u32 = 7;
/// Overhand passes used when none are configured.
pub const DEFAULT_OVERHAND_PASSES: u32 = 10;
/// Strip cuts are drawn from this range when none are configured.
pub const DEFAULT_STRIP_CUTS: core::ops::RangeInclusive<u32> = 3..=5;

/// Longest run of cards a riffle drops from one half at a time.
const MAX_RIFFLE_RUN: usize = 3;

/// Shuffle algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShuffleMethod {
    /// Uniform random permutation.
    #[default]
    FisherYates,
    /// Simulated riffle shuffle.
    Riffle,
    /// Simulated overhand shuffle.
    Overhand,
    /// Repeated strip cuts.
    StripCut,
}

impl ShuffleMethod {
    /// All methods, in lookup-table order.
    pub const ALL: [Self; 4] = [Self::FisherYates, Self::Riffle, Self::Overhand, Self::StripCut];

    const fn index(self) -> usize {
        match self {
            Self::FisherYates => 0,
            Self::Riffle => 1,
            Self::Overhand => 2,
            Self::StripCut => 3,
        }
    }
}

type ShuffleFn<T> = fn(&mut Vec<T>, Option<u32>, &mut ChaCha8Rng);

fn run_fisher_yates<T: Clone>(seq: &mut Vec<T>, _: Option<u32>, rng: &mut ChaCha8Rng) {
    fisher_yates(seq, rng);
}

fn run_riffle<T: Clone>(seq: &mut Vec<T>, passes: Option<u32>, rng: &mut ChaCha8Rng) {
    riffle(seq, passes.unwrap_or(DEFAULT_RIFFLE_PASSES), rng);
}

fn run_overhand<T: Clone>(seq: &mut Vec<T>, passes: Option<u32>, rng: &mut ChaCha8Rng) {
    overhand(seq, passes.unwrap_or(DEFAULT_OVERHAND_PASSES), rng);
}

fn run_strip_cut<T: Clone>(seq: &mut Vec<T>, cuts: Option<u32>, rng: &mut ChaCha8Rng) {
    let cuts = cuts.unwrap_or_else(|| rng.random_range(DEFAULT_STRIP_CUTS));
    strip_cut(seq, cuts, rng);
}

/// Dispatch table, indexed by [`ShuffleMethod::index`].
fn shuffle_table<T: Clone>() -> [ShuffleFn<T>; 4] {
    [
        run_fisher_yates::<T>,
        run_riffle::<T>,
        run_overhand::<T>,
        run_strip_cut::<T>,
    ]
}

/// Reorders `seq` with the chosen method.
///
/// `passes` is the riffle or overhand pass count, or the number of strip
/// cuts; `None` uses the method's default. Fisher-Yates ignores it.
pub fn shuffle_with<T: Clone>(
    seq: &mut Vec<T>,
    method: ShuffleMethod,
    passes: Option<u32>,
    rng: &mut ChaCha8Rng,
) {
    tracing::trace!(?method, ?passes, len = seq.len(), "shuffling");
    shuffle_table::<T>()[method.index()](seq, passes, rng);
}

/// Uniform Fisher-Yates shuffle, walking from the last index to the first.
pub fn fisher_yates<T, R: Rng + ?Sized>(seq: &mut [T], rng: &mut R) {
    for i in (1..seq.len()).rev() {
        let j = rng.random_range(0..=i);
        seq.swap(i, j);
    }
}

/// Riffle shuffle: split near the middle, then interleave runs from each half.
///
/// Approximates a physical riffle; the result is not uniform.
pub fn riffle<T: Clone, R: Rng + ?Sized>(seq: &mut Vec<T>, passes: u32, rng: &mut R) {
    let len = seq.len();
    if len < 2 {
        return;
    }

    for _ in 0..passes {
        let jitter = (len / 10).max(1);
        let low = (len / 2).saturating_sub(jitter);
        let high = (len / 2 + jitter).min(len);
        let cut = rng.random_range(low..=high);

        let (left, right) = seq.split_at(cut);
        let mut merged = Vec::with_capacity(len);
        let (mut l, mut r) = (0, 0);
        let mut from_left = rng.random_bool(0.5);

        while l < left.len() || r < right.len() {
            let run = rng.random_range(1..=MAX_RIFFLE_RUN);
            if from_left {
                let end = (l + run).min(left.len());
                merged.extend_from_slice(&left[l..end]);
                l = end;
            } else {
                let end = (r + run).min(right.len());
                merged.extend_from_slice(&right[r..end]);
                r = end;
            }
            from_left = !from_left;
        }

        *seq = merged;
    }
}

/// Overhand shuffle: move small packets from the top onto a new pile.
///
/// Each packet keeps its internal order, so the packets end up reversed.
pub fn overhand<T: Clone, R: Rng + ?Sized>(seq: &mut Vec<T>, passes: u32, rng: &mut R) {
    let len = seq.len();
    if len < 2 {
        return;
    }
    let max_packet = (len / 8).max(2);

    for _ in 0..passes {
        let mut packets: Vec<&[T]> = Vec::new();
        let mut rest = seq.as_slice();
        while !rest.is_empty() {
            let size = rng.random_range(1..=max_packet.min(rest.len()));
            let (packet, tail) = rest.split_at(size);
            packets.push(packet);
            rest = tail;
        }

        let pile: Vec<T> = packets.iter().rev().flat_map(|p| p.iter().cloned()).collect();
        *seq = pile;
    }
}

/// Strip cuts: move a random-sized block from the top to the bottom, `cuts` times.
pub fn strip_cut<T, R: Rng + ?Sized>(seq: &mut [T], cuts: u32, rng: &mut R) {
    let len = seq.len();
    if len < 2 {
        return;
    }
    for _ in 0..cuts {
        let block = rng.random_range(1..len);
        seq.rotate_left(block);
    }
}
