use std::collections::HashMap;

use cfgir::{func::LlvmFunc, loops::LoopPtr};
use llvm::{CompKind, CompOp, LlvmInstrVariant, LlvmTemp, Value};
use log::trace;

#[derive(Clone, Debug, PartialEq)]
pub enum LoopBound {
	Const(i32),
	Runtime(Value),
}

/// What the analyzer recovered about a loop's counter: the memory slot it
/// lives in, the bound it is compared against and the compare operator
/// gating the back-edge.
#[derive(Clone)]
pub struct InductionInfo {
	pub counter: LlvmTemp,
	pub bound: LoopBound,
	pub cond_op: CompOp,
}

impl InductionInfo {
	pub fn bound_is_const(&self) -> bool {
		matches!(self.bound, LoopBound::Const(_))
	}
}

/// Map every load's target temp to the address it was loaded from, over
/// the whole function. Used to give the compare operand in the header a
/// memory identity.
fn load_origins(func: &LlvmFunc) -> HashMap<LlvmTemp, LlvmTemp> {
	let mut origins = HashMap::new();
	for bb in func.cfg.blocks.iter() {
		for instr in bb.borrow().instrs.iter() {
			if let LlvmInstrVariant::LoadInstr(load) = instr.get_variant() {
				if let Value::Temp(addr) = &load.addr {
					origins.insert(load.target.clone(), addr.clone());
				}
			}
		}
	}
	origins
}

/// Recognize the loop's induction variable, or decline with `None`.
///
/// This is a deliberately narrow heuristic, not an induction-variable
/// analysis: the first integer compare in the header is assumed to gate
/// the back-edge, its left operand must be a value loaded from some slot
/// (that slot is taken to be the counter, starting at 0 and incremented
/// by 1 in the latch) and its right operand is the bound. Loops produced
/// by the frontend fit this shape; anything else must be declined rather
/// than guessed at. On an SSA form IR this should be replaced by a real
/// recognizer over header phis.
pub fn analyze_induction(
	func: &LlvmFunc,
	loop_: &LoopPtr,
) -> Option<InductionInfo> {
	let origins = load_origins(func);
	let header = loop_.borrow().header.clone();
	let header = header.borrow();
	let comp = header.instrs.iter().find_map(|instr| {
		match instr.get_variant() {
			LlvmInstrVariant::CompInstr(comp)
				if comp.kind == CompKind::Icmp =>
			{
				Some(comp.clone())
			}
			_ => None,
		}
	})?;
	let lhs = comp.lhs.unwrap_temp()?;
	let Some(counter) = origins.get(&lhs).cloned() else {
		trace!("compare operand {} has no load origin", lhs);
		return None;
	};
	let bound = match &comp.rhs {
		Value::Int(v) => LoopBound::Const(*v),
		other => LoopBound::Runtime(other.clone()),
	};
	Some(InductionInfo {
		counter,
		bound,
		cond_op: comp.op,
	})
}
