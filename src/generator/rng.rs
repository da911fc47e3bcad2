//! Seeded random source for dataset generation.
//!
//! Every dataset draws from its own stream, derived from one master seed
//! and a stable per-dataset slot. Generating executives never shifts the
//! values produced for usage trends, and a dataset is reproducible in
//! isolation given the master seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stable stream assignments. Append only: reordering changes every
/// dataset's output for a given seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum DatasetSlot {
    Usage = 0,
    Executives = 1,
    AccountPlanning = 2,
}

impl DatasetSlot {
    pub fn name(self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Executives => "executives",
            Self::AccountPlanning => "account_planning",
        }
    }
}

/// A deterministic random stream for one dataset.
#[derive(Debug, Clone)]
pub struct DataRng {
    inner: Pcg64Mcg,
}

impl DataRng {
    /// Derive the stream for `slot` from the master seed.
    pub fn for_slot(master_seed: u64, slot: DatasetSlot) -> Self {
        let derived = master_seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived),
        }
    }

    /// Integer in `[lo, hi]`. Bounds may be given in either order.
    pub fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.inner.gen_range(lo..=hi)
    }

    /// Unsigned integer in `[lo, hi]`. Bounds may be given in either order.
    pub fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.inner.gen_range(lo..=hi)
    }

    /// Float in `[lo, hi]`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo == hi {
            return lo;
        }
        let (lo, hi) = if lo < hi { (lo, hi) } else { (hi, lo) };
        self.inner.gen_range(lo..=hi)
    }
}

/// Draw a master seed from the platform entropy source.
pub fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = DataRng::for_slot(42, DatasetSlot::Usage);
        let mut b = DataRng::for_slot(42, DatasetSlot::Usage);
        for _ in 0..32 {
            assert_eq!(a.range_u64(0, 1_000_000), b.range_u64(0, 1_000_000));
        }
    }

    #[test]
    fn slots_are_independent_streams() {
        let mut a = DataRng::for_slot(42, DatasetSlot::Usage);
        let mut b = DataRng::for_slot(42, DatasetSlot::Executives);
        let xs: Vec<u64> = (0..8).map(|_| a.range_u64(0, u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.range_u64(0, u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = DataRng::for_slot(7, DatasetSlot::AccountPlanning);
        for _ in 0..1000 {
            let i = rng.range_i64(-15, 15);
            assert!((-15..=15).contains(&i));
            let f = rng.uniform(-0.1, 0.1);
            assert!((-0.1..=0.1).contains(&f));
        }
    }

    #[test]
    fn reversed_bounds_are_accepted() {
        let mut rng = DataRng::for_slot(1, DatasetSlot::Usage);
        let v = rng.range_u64(10, 5);
        assert!((5..=10).contains(&v));
        assert_eq!(rng.uniform(0.3, 0.3), 0.3);
    }
}
