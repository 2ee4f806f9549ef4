//! RNG oracle for deterministic random number generation.
//!
//! Shrine tempters and hostility curses are picked with these helpers so a
//! run replays identically from its seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same values given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Random index in `0..len`, or `None` when `len == 0`.
    fn pick_index(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32(seed) as usize % len)
    }

    /// Up to `count` distinct indices from `0..len`, in draw order.
    ///
    /// Uses a partial Fisher-Yates shuffle where draw `i` is seeded with
    /// `seed + i`.
    fn sample_indices(&self, seed: u64, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        for i in 0..take {
            let remaining = len - i;
            let offset = self.next_u32(seed.wrapping_add(i as u64)) as usize % remaining;
            pool.swap(i, i + offset);
        }
        pool.truncate(take);
        pool
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from run components.
///
/// * `run_seed` - seed fixed at run start
/// * `nonce` - run step counter (bumped on every resolved choice/event)
/// * `context` - distinguishes independent rolls within one step
pub fn compute_seed(run_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = run_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
