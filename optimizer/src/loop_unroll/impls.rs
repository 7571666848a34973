use cfgir::{
	basicblock::LlvmNode, func::LlvmFunc, loops::LoopPtr,
	program::LlvmProgram,
};
use llvm::LlvmTempManager;
use log::trace;
use utils::errors::Result;

use crate::IrOptimizer;

use super::{
	full::full_unroll,
	induction::{analyze_induction, LoopBound},
	partial::partial_unroll,
	LoopUnroll,
};

/// The loop's distinguished members, resolved once all preconditions
/// hold. `body` is the member list without header and latch; control
/// enters it at `body_entry` and falls into the latch from `body_tail`.
pub struct UnrollContext {
	pub preheader: LlvmNode,
	pub header: LlvmNode,
	pub latch: LlvmNode,
	pub exit: LlvmNode,
	pub blocks: Vec<LlvmNode>,
	pub body: Vec<LlvmNode>,
	pub body_entry: LlvmNode,
	pub body_tail: LlvmNode,
}

impl IrOptimizer for LoopUnroll {
	fn new() -> Self {
		Self::default()
	}
	fn apply(self, program: &mut LlvmProgram) -> Result<bool> {
		let LlvmProgram { funcs, temp_mgr } = program;
		let mut flag = false;
		for func in funcs.iter_mut() {
			let loops = func.cfg.loop_analysis();
			for loop_ in loops {
				if !loop_.borrow().no_inner {
					continue;
				}
				flag |= unroll_one_loop(func, &loop_, self.factor, temp_mgr)?;
			}
		}
		Ok(flag)
	}
}

/// Check the canonical-loop preconditions, derive the induction variable
/// and hand off to the strategy matching the bound. Any missing piece
/// declines the loop: the CFG is only touched once a strategy commits.
pub fn unroll_one_loop(
	func: &mut LlvmFunc,
	loop_: &LoopPtr,
	factor: usize,
	temp_mgr: &mut LlvmTempManager,
) -> Result<bool> {
	let header = loop_.borrow().header.clone();
	let Some(preheader) = loop_.borrow().get_loop_preheader() else {
		trace!("loop at {} declined: no preheader", header.borrow().label());
		return Ok(false);
	};
	let Some(latch) = loop_.borrow().get_single_latch() else {
		trace!("loop at {} declined: no single latch", header.borrow().label());
		return Ok(false);
	};
	let Some((exit, exit_prev)) = loop_.borrow().get_single_exit() else {
		trace!("loop at {} declined: no single exit", header.borrow().label());
		return Ok(false);
	};
	// the continuation test must sit in the header
	if exit_prev != header {
		trace!(
			"loop at {} declined: exits from {}",
			header.borrow().label(),
			exit_prev.borrow().label()
		);
		return Ok(false);
	}
	let Some(info) = analyze_induction(func, loop_) else {
		trace!(
			"loop at {} declined: induction variable not recognized",
			header.borrow().label()
		);
		return Ok(false);
	};
	let blocks = loop_.borrow().blocks.clone();
	let body: Vec<LlvmNode> = blocks
		.iter()
		.filter(|v| **v != header && **v != latch)
		.cloned()
		.collect();
	if body.is_empty() {
		trace!("loop at {} declined: empty body", header.borrow().label());
		return Ok(false);
	}
	let Some(body_entry) =
		header.borrow().succ.iter().find(|v| body.contains(v)).cloned()
	else {
		trace!(
			"loop at {} declined: header does not enter the body",
			header.borrow().label()
		);
		return Ok(false);
	};
	let tails: Vec<LlvmNode> = latch
		.borrow()
		.prev
		.iter()
		.filter(|v| body.contains(v))
		.cloned()
		.collect();
	let [body_tail] = tails.as_slice() else {
		trace!("loop at {} declined: no single body tail", header.borrow().label());
		return Ok(false);
	};
	let body_tail = body_tail.clone();
	if body_tail.borrow().succ.len() != 1 {
		trace!(
			"loop at {} declined: body does not fall straight into the latch",
			header.borrow().label()
		);
		return Ok(false);
	}

	let ctx = UnrollContext {
		preheader,
		header,
		latch,
		exit,
		blocks,
		body,
		body_entry,
		body_tail,
	};
	match info.bound {
		LoopBound::Const(_) => full_unroll(func, &ctx, &info, temp_mgr),
		LoopBound::Runtime(_) => {
			partial_unroll(func, &ctx, &info, factor, temp_mgr)
		}
	}
}
