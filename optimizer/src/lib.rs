pub mod loop_unroll;

use cfgir::program::LlvmProgram;
use utils::errors::Result;

pub use loop_unroll::LoopUnroll;

pub trait IrOptimizer {
	fn new() -> Self;
	/// Apply the pass to the whole program, reporting whether any IR
	/// changed. Passes either complete their rewrite or decline without
	/// touching anything observable.
	fn apply(self, program: &mut LlvmProgram) -> Result<bool>;
}
