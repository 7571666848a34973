use std::collections::HashMap;

use cfgir::basicblock::LlvmNode;
use cfgir::func::LlvmFunc;
use llvm::{
	ArithInstr, ArithOp, LlvmInstrVariant, LlvmTemp, LlvmTempManager,
	Value, VarType,
};
use log::{debug, trace};
use utils::errors::Result;

use super::{
	cloner::{clone_loop, duplicate_body},
	impls::UnrollContext,
	induction::InductionInfo,
	stitcher::EdgePlan,
};

/// Find the load of the counter slot in a block, as (position, target).
pub fn find_counter_load(
	bb: &LlvmNode,
	counter: &LlvmTemp,
) -> Option<(usize, LlvmTemp)> {
	bb.borrow().instrs.iter().enumerate().find_map(|(idx, instr)| {
		match instr.get_variant() {
			LlvmInstrVariant::LoadInstr(load)
				if load.addr == Value::Temp(counter.clone()) =>
			{
				Some((idx, load.target.clone()))
			}
			_ => None,
		}
	})
}

/// Find the latch's `counter + 1` instruction. Any other step size means
/// the loop is not the simple counted shape this pass handles.
pub fn find_latch_increment(
	latch: &LlvmNode,
	counter: &LlvmTemp,
) -> Option<usize> {
	let (_, loaded) = find_counter_load(latch, counter)?;
	latch.borrow().instrs.iter().enumerate().find_map(|(idx, instr)| {
		match instr.get_variant() {
			LlvmInstrVariant::ArithInstr(add)
				if add.op == ArithOp::Add
					&& add.lhs == Value::Temp(loaded.clone())
					&& add.rhs == Value::Int(1) =>
			{
				Some(idx)
			}
			_ => None,
		}
	})
}

/// Keep the loop but make every physical iteration run `factor` logical
/// ones.
///
/// A verbatim copy of the loop goes in first as the remainder path: the
/// header's exit edge is rerouted there, so whenever fewer than `factor`
/// iterations are left the remainder finishes them one at a time and
/// falls out to the real exit. The main loop then gets `factor - 1` extra
/// body copies between body tail and latch, a header test that looks
/// `factor - 1` iterations ahead, and a latch stride of `factor`.
pub fn partial_unroll(
	func: &mut LlvmFunc,
	ctx: &UnrollContext,
	info: &InductionInfo,
	factor: usize,
	temp_mgr: &mut LlvmTempManager,
) -> Result<bool> {
	let factor_i = factor as i32;
	let Some((load_idx, load_target)) =
		find_counter_load(&ctx.header, &info.counter)
	else {
		trace!("partial unroll declined: header never loads the counter");
		return Ok(false);
	};
	let Some(add_idx) = find_latch_increment(&ctx.latch, &info.counter)
	else {
		trace!("partial unroll declined: latch has no unit increment");
		return Ok(false);
	};
	debug!(
		"partially unrolling loop at {}, factor {}",
		ctx.header.borrow().label(),
		factor
	);

	// the remainder loop: an untouched copy of the whole loop, placed
	// right before the exit block
	let remainder = clone_loop(func, &ctx.blocks, temp_mgr)?;
	let mut insert_at =
		func.cfg.blocks.iter().position(|v| *v == ctx.exit).unwrap();
	for bb in remainder.blocks.iter() {
		func.cfg.blocks.insert(insert_at, bb.clone());
		insert_at += 1;
	}

	let chain =
		duplicate_body(func, &ctx.body, factor - 1, &info.counter, temp_mgr)?;
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

	// chain the copies back-to-back; the last one keeps its edge into the
	// original latch
	let mut plan = EdgePlan::new();
	let mut tail = ctx.body_tail.clone();
	for clone in chain.iter() {
		plan.retarget(&tail, &ctx.latch, &clone.get(&ctx.body_entry));
		tail = clone.get(&ctx.body_tail);
	}
	plan.retarget(&ctx.header, &ctx.exit, &remainder.get(&ctx.header));
	plan.apply()?;

	// the test now decides whether a whole stride fits: compare against
	// the counter value of the stride's last iteration
	let adjusted = temp_mgr.new_temp(VarType::I32);
	{
		let mut header = ctx.header.borrow_mut();
		header.instrs.insert(
			load_idx + 1,
			Box::new(ArithInstr {
				target: adjusted.clone(),
				op: ArithOp::Add,
				var_type: VarType::I32,
				lhs: Value::Temp(load_target.clone()),
				rhs: Value::Int(factor_i - 1),
			}),
		);
		let mut use_map = HashMap::new();
		use_map.insert(load_target.clone(), Value::Temp(adjusted.clone()));
		for instr in header.instrs.iter_mut().skip(load_idx + 2) {
			instr.map_temp(&use_map);
		}
		if let Some(jump) = header.jump_instr.as_mut() {
			jump.map_temp(&use_map);
		}
	}

	// one back-edge now stands for a whole stride
	{
		let mut latch = ctx.latch.borrow_mut();
		let (target, op, var_type, lhs) = {
			let LlvmInstrVariant::ArithInstr(add) =
				latch.instrs[add_idx].get_variant()
			else {
				unreachable!()
			};
			(add.target.clone(), add.op, add.var_type, add.lhs.clone())
		};
		latch.instrs[add_idx] = Box::new(ArithInstr {
			target,
			op,
			var_type,
			lhs,
			rhs: Value::Int(factor_i),
		});
	}
	Ok(true)
}
