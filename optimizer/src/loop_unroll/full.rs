use cfgir::{basicblock::LlvmNode, func::LlvmFunc};
use llvm::{
	ArithInstr, ArithOp, CompOp, LlvmTemp, LlvmTempManager, LoadInstr,
	StoreInstr, Value, VarType,
};
use log::{debug, trace};
use utils::errors::Result;

use super::{
	cloner::duplicate_body,
	impls::UnrollContext,
	induction::{InductionInfo, LoopBound},
	partial::find_latch_increment,
	stitcher::EdgePlan,
};

/// Replace the loop by `bound` straight-line copies of its body.
///
/// The preheader jumps straight into the first copy, the copies chain
/// into each other and the last one falls through to the exit; header and
/// latch disappear with the test they carried. Copy `i` reads the counter
/// slot offset by `i`, which matches iteration `i` because the slot keeps
/// its starting value once the latch increment is gone. The trip count is
/// taken to be the bound itself, i.e. a counter starting at 0 with unit
/// step, which is what the induction analyzer recognizes.
pub fn full_unroll(
	func: &mut LlvmFunc,
	ctx: &UnrollContext,
	info: &InductionInfo,
	temp_mgr: &mut LlvmTempManager,
) -> Result<bool> {
	let LoopBound::Const(bound) = info.bound else {
		unreachable!("full unrolling needs a constant bound")
	};
	if info.cond_op != CompOp::SLT {
		trace!("full unroll declined: compare is {}", info.cond_op);
		return Ok(false);
	}
	if bound < 1 {
		trace!("full unroll declined: bound {} never iterates", bound);
		return Ok(false);
	}
	if find_latch_increment(&ctx.latch, &info.counter).is_none() {
		trace!("full unroll declined: latch has no unit increment");
		return Ok(false);
	}
	debug!(
		"fully unrolling loop at {}, {} copies",
		ctx.header.borrow().label(),
		bound
	);

	let chain = duplicate_body(
		func,
		&ctx.body,
		(bound - 1) as usize,
		&info.counter,
		temp_mgr,
	)?;
	let mut insert_at = func
		.cfg
		.blocks
		.iter()
		.position(|v| *v == ctx.body_tail)
		.unwrap() + 1;
	for clone in chain.iter() {
		for bb in clone.blocks.iter() {
			func.cfg.blocks.insert(insert_at, bb.clone());
			insert_at += 1;
		}
	}

	let mut plan = EdgePlan::new();
	plan.retarget(&ctx.preheader, &ctx.header, &ctx.body_entry);
	let mut tail = ctx.body_tail.clone();
	for clone in chain.iter() {
		plan.retarget(&tail, &ctx.latch, &clone.get(&ctx.body_entry));
		tail = clone.get(&ctx.body_tail);
	}
	plan.retarget(&tail, &ctx.latch, &ctx.exit);
	plan.apply()?;

	// the latch increments are gone, so leave the slot at the value the
	// loop would have produced for whoever reads it after the exit
	store_final_counter(&tail, &info.counter, bound, temp_mgr);

	func.cfg.remove_block(&ctx.header);
	func.cfg.remove_block(&ctx.latch);
	Ok(true)
}

fn store_final_counter(
	tail: &LlvmNode,
	counter: &LlvmTemp,
	bound: i32,
	temp_mgr: &mut LlvmTempManager,
) {
	let loaded = temp_mgr.new_temp(VarType::I32);
	let total = temp_mgr.new_temp(VarType::I32);
	let mut tail = tail.borrow_mut();
	tail.push(Box::new(LoadInstr {
		target: loaded.clone(),
		var_type: VarType::I32,
		addr: Value::Temp(counter.clone()),
	}));
	tail.push(Box::new(ArithInstr {
		target: total.clone(),
		op: ArithOp::Add,
		var_type: VarType::I32,
		lhs: Value::Temp(loaded),
		rhs: Value::Int(bound),
	}));
	tail.push(Box::new(StoreInstr {
		value: Value::Temp(total),
		addr: Value::Temp(counter.clone()),
	}));
}
