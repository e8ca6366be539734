use crate::ledger::{Severity, ViolationLedger};

/// Longest read position tracked. Bases beyond this are ignored, not an
/// error; 600 comfortably exceeds practical short-read lengths.
pub const MAX_READ_LEN: usize = 600;

const BASE_FRACTION_LIMIT: f64 = 0.45;
const OTHER_FRACTION_LIMIT: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
struct BaseTally {
    a: u64,
    c: u64,
    g: u64,
    t: u64,
    other: u64,
}

impl BaseTally {
    fn total(&self) -> u64 {
        self.a + self.c + self.g + self.t + self.other
    }
}

/// Per-position nucleotide tallies for one file.
///
/// Every observed base lands in exactly one of five buckets per position, so
/// the bucket sum at position `i` always equals the number of observed base
/// strings longer than `i`.
#[derive(Debug)]
pub struct CompositionTable {
    positions: Vec<BaseTally>,
}

impl CompositionTable {
    pub fn new() -> Self {
        Self {
            positions: vec![BaseTally::default(); MAX_READ_LEN],
        }
    }

    /// Tally one base string. Only upper-case `A`/`C`/`G`/`T` count as known
    /// bases; anything else (lower-case, `N`, ambiguity codes) goes in the
    /// "other" bucket.
    pub fn observe(&mut self, bases: &str) {
        for (tally, b) in self.positions.iter_mut().zip(bases.bytes()) {
            match b {
                b'A' => tally.a += 1,
                b'C' => tally.c += 1,
                b'G' => tally.g += 1,
                b'T' => tally.t += 1,
                _ => tally.other += 1,
            }
        }
    }

    /// Check every position for composition skew, recording findings in
    /// `ledger` at the informational level.
    ///
    /// A single base above 45% of observations, or non-ACGT characters above
    /// 20%, is reported. Both thresholds are strict. Positions no read
    /// reached have no defined fraction and are skipped.
    pub fn evaluate(&self, ledger: &mut ViolationLedger) {
        for (i, tally) in self.positions.iter().enumerate() {
            let total = tally.total();
            if total == 0 {
                continue;
            }
            let checks = [
                ("A", tally.a, BASE_FRACTION_LIMIT),
                ("C", tally.c, BASE_FRACTION_LIMIT),
                ("G", tally.g, BASE_FRACTION_LIMIT),
                ("T", tally.t, BASE_FRACTION_LIMIT),
                ("unknown", tally.other, OTHER_FRACTION_LIMIT),
            ];
            for (name, count, limit) in checks {
                let fraction = count as f64 / total as f64;
                if fraction > limit {
                    ledger.record(
                        Severity::Info,
                        format!("Read {} {} fraction is {}", i + 1, name, fraction),
                    );
                }
            }
        }
    }

    /// Number of bases observed at a 0-based position across all reads.
    pub fn observations_at(&self, position: usize) -> u64 {
        self.positions
            .get(position)
            .map(BaseTally::total)
            .unwrap_or(0)
    }
}

impl Default for CompositionTable {
    fn default() -> Self {
        Self::new()
    }
}
