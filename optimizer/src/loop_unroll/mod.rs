use utils::DEFAULT_UNROLL_FACTOR;

pub mod impls;
pub mod induction;

mod cloner;
mod full;
mod partial;
mod stitcher;

#[cfg(test)]
mod tests;

pub use induction::{InductionInfo, LoopBound};

/// Rewrites counted loops so the body runs several times per original
/// iteration. A constant trip count eliminates the loop entirely; an
/// unknown one keeps the loop with a widened stride plus a one-at-a-time
/// remainder loop for the leftover iterations.
///
/// The pass expects canonical loops: single latch, single exit edge and a
/// dedicated preheader. Anything else is declined, leaving the CFG as it
/// was.
pub struct LoopUnroll {
	factor: usize,
}

impl LoopUnroll {
	/// Override the stride used for partial unrolling. Factors below 2
	/// would not unroll anything and are rejected.
	pub fn with_factor(factor: usize) -> Option<Self> {
		if factor < 2 {
			return None;
		}
		Some(Self { factor })
	}
}

impl Default for LoopUnroll {
	fn default() -> Self {
		Self {
			factor: DEFAULT_UNROLL_FACTOR,
		}
	}
}
