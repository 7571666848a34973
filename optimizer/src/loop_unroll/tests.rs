use std::collections::HashMap;

use cfgir::{
	basicblock::{BasicBlock, LlvmNode},
	cfg::{force_link_node, CFG},
	func::LlvmFunc,
	program::LlvmProgram,
};
use llvm::{
	AllocInstr, ArithInstr, ArithOp, CompInstr, CompKind, CompOp,
	JumpCondInstr, JumpInstr, LlvmInstr, LlvmInstrVariant, LlvmTemp,
	LlvmTempManager, LoadInstr, RetInstr, StoreInstr, Value, VarType,
};
use utils::{Label, UnrollError};

use super::{cloner::duplicate_body, induction::analyze_induction};
use crate::{IrOptimizer, LoopUnroll};

fn init_log() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn load(target: &LlvmTemp, addr: &LlvmTemp) -> LlvmInstr {
	Box::new(LoadInstr {
		target: target.clone(),
		var_type: VarType::I32,
		addr: Value::Temp(addr.clone()),
	})
}

fn store(value: Value, addr: &LlvmTemp) -> LlvmInstr {
	Box::new(StoreInstr {
		value,
		addr: Value::Temp(addr.clone()),
	})
}

fn alloca(target: &LlvmTemp) -> LlvmInstr {
	Box::new(AllocInstr {
		target: target.clone(),
		var_type: VarType::I32,
		length: Value::Int(4),
	})
}

fn add(target: &LlvmTemp, lhs: Value, rhs: Value) -> LlvmInstr {
	Box::new(ArithInstr {
		target: target.clone(),
		op: ArithOp::Add,
		var_type: VarType::I32,
		lhs,
		rhs,
	})
}

fn icmp(target: &LlvmTemp, op: CompOp, lhs: Value, rhs: Value) -> LlvmInstr {
	Box::new(CompInstr {
		kind: CompKind::Icmp,
		target: target.clone(),
		op,
		var_type: VarType::I32,
		lhs,
		rhs,
	})
}

fn cond_jump(cond: &LlvmTemp, yes: Label, no: Label) -> LlvmInstr {
	Box::new(JumpCondInstr {
		var_type: VarType::I32,
		cond: Value::Temp(cond.clone()),
		target_true: yes,
		target_false: no,
	})
}

fn ret(value: Value) -> LlvmInstr {
	Box::new(RetInstr { value: Some(value) })
}

fn label_of(bb: &LlvmNode) -> Label {
	bb.borrow().label()
}

/// entry, header, body, latch, exit: sums the counter into a slot and
/// returns sum + final counter.
///
///   entry:  i = alloca; s = alloca; *i = 0; *s = 0
///   B1:     t1 = *i; c = t1 <op> bound; br c, B2, B4
///   B2:     t2 = *i; t3 = *s; t4 = t3 + t2; *s = t4
///   B3:     t5 = *i; t6 = t5 + 1; *i = t6
///   B4:     t7 = *s; t8 = *i; t9 = t7 + t8; ret t9
fn counted_loop_cmp(
	bound: Value,
	op: CompOp,
	mgr: &mut LlvmTempManager,
) -> LlvmFunc {
	let i_addr = mgr.new_temp(VarType::I32Ptr);
	let s_addr = mgr.new_temp(VarType::I32Ptr);
	let temps: Vec<LlvmTemp> =
		(0..10).map(|_| mgr.new_temp(VarType::I32)).collect();
	let [t1, cond, t2, t3, t4, t5, t6, t7, t8, t9] = temps.as_slice()
	else {
		unreachable!()
	};
	let blocks: Vec<LlvmNode> = (0..5).map(BasicBlock::new_node).collect();
	{
		let mut b = blocks[0].borrow_mut();
		b.push(alloca(&i_addr));
		b.push(alloca(&s_addr));
		b.push(store(Value::Int(0), &i_addr));
		b.push(store(Value::Int(0), &s_addr));
	}
	{
		let mut b = blocks[1].borrow_mut();
		b.push(load(t1, &i_addr));
		b.push(icmp(cond, op, Value::Temp(t1.clone()), bound));
	}
	{
		let mut b = blocks[2].borrow_mut();
		b.push(load(t2, &i_addr));
		b.push(load(t3, &s_addr));
		b.push(add(t4, Value::Temp(t3.clone()), Value::Temp(t2.clone())));
		b.push(store(Value::Temp(t4.clone()), &s_addr));
	}
	{
		let mut b = blocks[3].borrow_mut();
		b.push(load(t5, &i_addr));
		b.push(add(t6, Value::Temp(t5.clone()), Value::Int(1)));
		b.push(store(Value::Temp(t6.clone()), &i_addr));
	}
	{
		let mut b = blocks[4].borrow_mut();
		b.push(load(t7, &s_addr));
		b.push(load(t8, &i_addr));
		b.push(add(t9, Value::Temp(t7.clone()), Value::Temp(t8.clone())));
	}
	force_link_node(&blocks[0], &blocks[1]);
	force_link_node(&blocks[1], &blocks[2]);
	force_link_node(&blocks[1], &blocks[4]);
	force_link_node(&blocks[2], &blocks[3]);
	force_link_node(&blocks[3], &blocks[1]);
	let jumps: Vec<LlvmInstr> = vec![
		JumpInstr::new(label_of(&blocks[1])),
		cond_jump(cond, label_of(&blocks[2]), label_of(&blocks[4])),
		JumpInstr::new(label_of(&blocks[3])),
		JumpInstr::new(label_of(&blocks[1])),
		ret(Value::Temp(t9.clone())),
	];
	for (bb, jump) in blocks.iter().zip(jumps) {
		bb.borrow_mut().set_jump(Some(jump));
	}
	LlvmFunc {
		total: 4,
		cfg: CFG { blocks },
		name: "sum".to_string(),
		ret_type: VarType::I32,
		params: Vec::new(),
	}
}

fn counted_loop(bound: i32, mgr: &mut LlvmTempManager) -> LlvmFunc {
	counted_loop_cmp(Value::Int(bound), CompOp::SLT, mgr)
}

fn counted_loop_runtime(
	mgr: &mut LlvmTempManager,
) -> (LlvmFunc, LlvmTemp) {
	let n = mgr.new_temp(VarType::I32);
	let mut func =
		counted_loop_cmp(Value::Temp(n.clone()), CompOp::SLT, mgr);
	func.params = vec![Value::Temp(n.clone())];
	(func, n)
}

fn unroll(
	pass: LoopUnroll,
	func: LlvmFunc,
	mgr: LlvmTempManager,
) -> (bool, LlvmProgram) {
	let mut program = LlvmProgram::new(vec![func], mgr);
	let changed = pass.apply(&mut program).unwrap();
	(changed, program)
}

fn value_of(regs: &HashMap<String, i32>, v: &Value) -> i32 {
	match v {
		Value::Int(x) => *x,
		Value::Temp(t) => regs[&t.name],
		Value::Float(_) => panic!("float value in integer test"),
	}
}

/// Straight-line reference interpreter over the integer subset the tests
/// use, in the spirit of the compiler's IR-level simulator.
fn run(func: &LlvmFunc, args: &[(LlvmTemp, i32)]) -> i32 {
	let mut regs: HashMap<String, i32> =
		args.iter().map(|(t, v)| (t.name.clone(), *v)).collect();
	let mut mem: HashMap<String, i32> = HashMap::new();
	let mut cur = func.cfg.get_entry();
	for _ in 0..100_000 {
		let next;
		{
			let bb = cur.borrow();
			for instr in bb.instrs.iter() {
				match instr.get_variant() {
					LlvmInstrVariant::AllocInstr(i) => {
						mem.insert(i.target.name.clone(), 0);
					}
					LlvmInstrVariant::LoadInstr(i) => {
						let Value::Temp(addr) = &i.addr else {
							panic!("load from a non-temp address")
						};
						regs.insert(i.target.name.clone(), mem[&addr.name]);
					}
					LlvmInstrVariant::StoreInstr(i) => {
						let Value::Temp(addr) = &i.addr else {
							panic!("store to a non-temp address")
						};
						let v = value_of(&regs, &i.value);
						mem.insert(addr.name.clone(), v);
					}
					LlvmInstrVariant::ArithInstr(i) => {
						let lhs = value_of(&regs, &i.lhs);
						let rhs = value_of(&regs, &i.rhs);
						let res = match i.op {
							ArithOp::Add => lhs + rhs,
							ArithOp::Sub => lhs - rhs,
							ArithOp::Mul => lhs * rhs,
							_ => panic!("unsupported arith op"),
						};
						regs.insert(i.target.name.clone(), res);
					}
					LlvmInstrVariant::CompInstr(i) => {
						let lhs = value_of(&regs, &i.lhs);
						let rhs = value_of(&regs, &i.rhs);
						let res = match i.op {
							CompOp::SLT => lhs < rhs,
							CompOp::SLE => lhs <= rhs,
							CompOp::SGT => lhs > rhs,
							CompOp::SGE => lhs >= rhs,
							CompOp::EQ => lhs == rhs,
							CompOp::NE => lhs != rhs,
							_ => panic!("unsupported compare op"),
						};
						regs.insert(i.target.name.clone(), res as i32);
					}
					_ => panic!("unsupported instruction"),
				}
			}
			match bb.jump_instr.as_ref().expect("terminator").get_variant()
			{
				LlvmInstrVariant::JumpInstr(j) => next = j.target.clone(),
				LlvmInstrVariant::JumpCondInstr(j) => {
					next = if value_of(&regs, &j.cond) != 0 {
						j.target_true.clone()
					} else {
						j.target_false.clone()
					};
				}
				LlvmInstrVariant::RetInstr(r) => {
					return value_of(
						&regs,
						r.value.as_ref().expect("ret value"),
					)
				}
				_ => panic!("bad terminator"),
			}
		}
		cur = func
			.cfg
			.blocks
			.iter()
			.find(|bb| bb.borrow().label() == next)
			.expect("jump target exists")
			.clone();
	}
	panic!("interpreter step limit exceeded");
}

fn counter_slot(func: &LlvmFunc) -> LlvmTemp {
	let entry = func.cfg.get_entry();
	let entry = entry.borrow();
	let LlvmInstrVariant::AllocInstr(alloc) = entry.instrs[0].get_variant()
	else {
		panic!("entry must start with the counter alloca")
	};
	alloc.target.clone()
}

fn has_compare(func: &LlvmFunc) -> bool {
	func.cfg.blocks.iter().any(|bb| {
		bb.borrow().instrs.iter().any(|instr| {
			matches!(instr.get_variant(), LlvmInstrVariant::CompInstr(_))
		})
	})
}

fn find_block(func: &LlvmFunc, label: &str) -> LlvmNode {
	func
		.cfg
		.blocks
		.iter()
		.find(|bb| bb.borrow().label().name == label)
		.expect("block exists")
		.clone()
}

/// Per block: the constants added directly to a freshly loaded counter
/// value.
fn counter_adjust_offsets(
	func: &LlvmFunc,
	i_addr: &LlvmTemp,
) -> Vec<Vec<i32>> {
	func
		.cfg
		.blocks
		.iter()
		.map(|bb| {
			let bb = bb.borrow();
			let mut offsets = Vec::new();
			for w in 1..bb.instrs.len() {
				let (
					LlvmInstrVariant::LoadInstr(load),
					LlvmInstrVariant::ArithInstr(step),
				) = (
					bb.instrs[w - 1].get_variant(),
					bb.instrs[w].get_variant(),
				)
				else {
					continue;
				};
				if load.addr == Value::Temp(i_addr.clone())
					&& step.lhs == Value::Temp(load.target.clone())
				{
					if let Value::Int(v) = step.rhs {
						offsets.push(v);
					}
				}
			}
			offsets
		})
		.collect()
}

#[test]
fn full_unroll_replaces_loop_with_copies() {
	init_log();
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(4, &mut mgr);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(changed);
	let func = &program.funcs[0];
	// entry, original body, three copies, exit; no test left anywhere
	assert_eq!(func.cfg.size(), 6);
	assert!(!has_compare(func));
	// sum 0..4 plus the final counter value
	assert_eq!(run(func, &[]), 10);
}

#[test]
fn full_unroll_matches_original_execution() {
	for bound in 1..8 {
		let mut mgr = LlvmTempManager::new();
		let original = counted_loop(bound, &mut mgr);
		let expected = run(&original, &[]);
		let (changed, program) = unroll(LoopUnroll::new(), original, mgr);
		assert!(changed);
		assert_eq!(run(&program.funcs[0], &[]), expected);
	}
}

#[test]
fn full_unroll_offsets_are_generation_indexed() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(4, &mut mgr);
	let i_addr = counter_slot(&func);
	let (_, program) = unroll(LoopUnroll::new(), func, mgr);
	let offsets = counter_adjust_offsets(&program.funcs[0], &i_addr);
	// copy i reads counter + i; the last copy also rebuilds the slot's
	// final value (counter + bound)
	assert_eq!(
		offsets,
		vec![vec![], vec![], vec![1], vec![2], vec![3, 4], vec![]]
	);
}

#[test]
fn full_unroll_clone_operands_stay_inside_their_copy() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(4, &mut mgr);
	let (_, program) = unroll(LoopUnroll::new(), func, mgr);
	let func = &program.funcs[0];
	// the first copy sits right after the original body
	let clone = func.cfg.blocks[2].borrow();
	// load i, adjust, load s, sum, store
	assert_eq!(clone.instrs.len(), 5);
	let LlvmInstrVariant::LoadInstr(sum_load) =
		clone.instrs[2].get_variant()
	else {
		panic!("expected the accumulator load")
	};
	let LlvmInstrVariant::ArithInstr(adjust) =
		clone.instrs[1].get_variant()
	else {
		panic!("expected the counter adjust")
	};
	let LlvmInstrVariant::ArithInstr(sum) = clone.instrs[3].get_variant()
	else {
		panic!("expected the sum")
	};
	// both operands resolve to this copy's own values, the counter one
	// through its adjusted add
	assert_eq!(sum.lhs, Value::Temp(sum_load.target.clone()));
	assert_eq!(sum.rhs, Value::Temp(adjust.target.clone()));
}

#[test]
fn full_unroll_single_iteration() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(1, &mut mgr);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(changed);
	let func = &program.funcs[0];
	assert_eq!(func.cfg.size(), 3);
	assert!(!has_compare(func));
	assert_eq!(run(func, &[]), 1);
}

#[test]
fn nonpositive_bound_declines() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(0, &mut mgr);
	let before = format!("{}", func);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
	assert_eq!(format!("{}", program.funcs[0]), before);
}

#[test]
fn unhandled_compare_declines() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop_cmp(Value::Int(4), CompOp::SLE, &mut mgr);
	let before = format!("{}", func);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
	assert_eq!(format!("{}", program.funcs[0]), before);
}

#[test]
fn partial_unroll_structure() {
	init_log();
	let mut mgr = LlvmTempManager::new();
	let (func, _) = counted_loop_runtime(&mut mgr);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(changed);
	let func = &program.funcs[0];
	// original five blocks, a three-block remainder loop, two body copies
	assert_eq!(func.cfg.size(), 10);

	// the latch now strides by the whole factor
	let latch = find_block(func, "B3");
	let stride = latch.borrow().instrs.iter().find_map(|instr| {
		match instr.get_variant() {
			LlvmInstrVariant::ArithInstr(a) => Some(a.rhs.clone()),
			_ => None,
		}
	});
	assert_eq!(stride, Some(Value::Int(3)));

	// the header test looks factor - 1 iterations ahead
	let header = find_block(func, "B1");
	let header = header.borrow();
	assert_eq!(header.instrs.len(), 3);
	let LlvmInstrVariant::LoadInstr(load) = header.instrs[0].get_variant()
	else {
		panic!("header starts with the counter load")
	};
	let LlvmInstrVariant::ArithInstr(ahead) =
		header.instrs[1].get_variant()
	else {
		panic!("counter load is adjusted")
	};
	assert_eq!(ahead.lhs, Value::Temp(load.target.clone()));
	assert_eq!(ahead.rhs, Value::Int(2));
	let LlvmInstrVariant::CompInstr(comp) = header.instrs[2].get_variant()
	else {
		panic!("header ends in the test")
	};
	assert_eq!(comp.lhs, Value::Temp(ahead.target.clone()));

	// the exit edge reaches the exit through the remainder loop
	let LlvmInstrVariant::JumpCondInstr(jump) =
		header.jump_instr.as_ref().unwrap().get_variant()
	else {
		panic!("header branches");
	};
	assert_ne!(jump.target_false.name, "B4");
	let remainder_header = find_block(func, &jump.target_false.name);
	let remainder_header = remainder_header.borrow();
	assert!(remainder_header
		.instrs
		.iter()
		.any(|i| matches!(i.get_variant(), LlvmInstrVariant::CompInstr(_))));
	let LlvmInstrVariant::JumpCondInstr(remainder_jump) =
		remainder_header.jump_instr.as_ref().unwrap().get_variant()
	else {
		panic!("remainder header branches");
	};
	assert_eq!(remainder_jump.target_false.name, "B4");
}

#[test]
fn partial_unroll_runs_every_iteration_exactly_once() {
	let mut mgr = LlvmTempManager::new();
	let (func, n) = counted_loop_runtime(&mut mgr);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(changed);
	let func = &program.funcs[0];
	for trip in 0..=10 {
		let expected = trip * (trip - 1) / 2 + trip;
		assert_eq!(
			run(func, &[(n.clone(), trip)]),
			expected,
			"trip count {}",
			trip
		);
	}
}

#[test]
fn partial_unroll_with_configured_factor() {
	let mut mgr = LlvmTempManager::new();
	let (func, n) = counted_loop_runtime(&mut mgr);
	let pass = LoopUnroll::with_factor(4).unwrap();
	let (changed, program) = unroll(pass, func, mgr);
	assert!(changed);
	let func = &program.funcs[0];
	// three extra copies this time
	assert_eq!(func.cfg.size(), 11);
	for trip in 0..=9 {
		let expected = trip * (trip - 1) / 2 + trip;
		assert_eq!(run(func, &[(n.clone(), trip)]), expected);
	}
}

#[test]
fn factor_below_two_is_rejected() {
	assert!(LoopUnroll::with_factor(0).is_none());
	assert!(LoopUnroll::with_factor(1).is_none());
	assert!(LoopUnroll::with_factor(2).is_some());
}

#[test]
fn unrolling_is_structurally_repeatable() {
	let build = || {
		let mut mgr = LlvmTempManager::new();
		let func = counted_loop(4, &mut mgr);
		unroll(LoopUnroll::new(), func, mgr)
	};
	let (_, first) = build();
	let (_, second) = build();
	assert_eq!(format!("{}", first), format!("{}", second));
}

#[test]
fn straight_line_code_is_left_alone() {
	let mut mgr = LlvmTempManager::new();
	let t = mgr.new_temp(VarType::I32Ptr);
	let blocks = vec![BasicBlock::new_node(0)];
	blocks[0].borrow_mut().push(alloca(&t));
	blocks[0].borrow_mut().set_jump(Some(ret(Value::Int(0))));
	let func = LlvmFunc {
		total: 0,
		cfg: CFG { blocks },
		name: "nop".to_string(),
		ret_type: VarType::I32,
		params: Vec::new(),
	};
	let (changed, _) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
}

// A loop gated on a loaded flag instead of a counter compare: nothing to
// recognize, nothing may change.
#[test]
fn unrecognized_header_declines() {
	let mut mgr = LlvmTempManager::new();
	let flag = mgr.new_temp(VarType::I32Ptr);
	let t = mgr.new_temp(VarType::I32);
	let blocks: Vec<LlvmNode> = (0..5).map(BasicBlock::new_node).collect();
	blocks[0].borrow_mut().push(alloca(&flag));
	blocks[0].borrow_mut().push(store(Value::Int(0), &flag));
	blocks[1].borrow_mut().push(load(&t, &flag));
	force_link_node(&blocks[0], &blocks[1]);
	force_link_node(&blocks[1], &blocks[2]);
	force_link_node(&blocks[1], &blocks[4]);
	force_link_node(&blocks[2], &blocks[3]);
	force_link_node(&blocks[3], &blocks[1]);
	let jumps: Vec<LlvmInstr> = vec![
		JumpInstr::new(label_of(&blocks[1])),
		cond_jump(&t, label_of(&blocks[2]), label_of(&blocks[4])),
		JumpInstr::new(label_of(&blocks[3])),
		JumpInstr::new(label_of(&blocks[1])),
		ret(Value::Int(0)),
	];
	for (bb, jump) in blocks.iter().zip(jumps) {
		bb.borrow_mut().set_jump(Some(jump));
	}
	let func = LlvmFunc {
		total: 4,
		cfg: CFG { blocks },
		name: "flag".to_string(),
		ret_type: VarType::I32,
		params: Vec::new(),
	};
	let before = format!("{}", func);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
	assert_eq!(format!("{}", program.funcs[0]), before);
}

// Break out of the body: two edges leave the loop, which is out of shape.
#[test]
fn multiple_exits_decline() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(4, &mut mgr);
	let breaker = mgr.new_temp(VarType::I32);
	let cond = mgr.new_temp(VarType::I32);
	{
		let body = find_block(&func, "B2");
		let i_addr = counter_slot(&func);
		let mut body = body.borrow_mut();
		body.push(load(&breaker, &i_addr));
		body.push(icmp(
			&cond,
			CompOp::EQ,
			Value::Temp(breaker.clone()),
			Value::Int(2),
		));
		body.set_jump(Some(cond_jump(
			&cond,
			Label::new("B4"),
			Label::new("B3"),
		)));
	}
	{
		let body = find_block(&func, "B2");
		let exit = find_block(&func, "B4");
		force_link_node(&body, &exit);
	}
	let before = format!("{}", func);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
	assert_eq!(format!("{}", program.funcs[0]), before);
}

// Two predecessors from outside the loop: no preheader to redirect.
#[test]
fn missing_preheader_declines() {
	let mut mgr = LlvmTempManager::new();
	let mut func = counted_loop(4, &mut mgr);
	let side = BasicBlock::new_node(5);
	func.total = 5;
	let entry = func.cfg.get_entry();
	let header = find_block(&func, "B1");
	let picker = mgr.new_temp(VarType::I32);
	{
		let i_addr = counter_slot(&func);
		let mut entry_mut = entry.borrow_mut();
		entry_mut.push(load(&picker, &i_addr));
		entry_mut.set_jump(Some(cond_jump(
			&picker,
			Label::new("B5"),
			Label::new("B1"),
		)));
	}
	side.borrow_mut().set_jump(Some(JumpInstr::new(Label::new("B1"))));
	force_link_node(&entry, &side);
	force_link_node(&side, &header);
	func.cfg.blocks.insert(1, side);
	let before = format!("{}", func);
	let (changed, program) = unroll(LoopUnroll::new(), func, mgr);
	assert!(!changed);
	assert_eq!(format!("{}", program.funcs[0]), before);
}

#[test]
fn induction_analysis_reads_the_header() {
	let mut mgr = LlvmTempManager::new();
	let func = counted_loop(4, &mut mgr);
	let loops = func.cfg.loop_analysis();
	assert_eq!(loops.len(), 1);
	let info = analyze_induction(&func, &loops[0]).unwrap();
	assert_eq!(info.counter, counter_slot(&func));
	assert_eq!(info.bound, super::LoopBound::Const(4));
	assert_eq!(info.cond_op, CompOp::SLT);
}

// An operand that claims to come from inside the region but was never
// cloned must fail loudly instead of leaking a half-wired graph.
#[test]
fn cloning_detects_unresolved_operands() {
	let mut mgr = LlvmTempManager::new();
	let x = mgr.new_temp(VarType::I32);
	let y = mgr.new_temp(VarType::I32);
	let counter = mgr.new_temp(VarType::I32Ptr);
	let blocks: Vec<LlvmNode> = (0..2).map(BasicBlock::new_node).collect();
	// B0 uses y before the region ever defines it
	blocks[0]
		.borrow_mut()
		.push(add(&x, Value::Temp(y.clone()), Value::Int(1)));
	blocks[1].borrow_mut().push(add(&y, Value::Int(0), Value::Int(1)));
	force_link_node(&blocks[0], &blocks[1]);
	blocks[0]
		.borrow_mut()
		.set_jump(Some(JumpInstr::new(label_of(&blocks[1]))));
	blocks[1].borrow_mut().set_jump(Some(ret(Value::Int(0))));
	let mut func = LlvmFunc {
		total: 1,
		cfg: CFG {
			blocks: blocks.clone(),
		},
		name: "broken".to_string(),
		ret_type: VarType::I32,
		params: Vec::new(),
	};
	let err = match duplicate_body(&mut func, &blocks, 1, &counter, &mut mgr)
	{
		Ok(_) => panic!("cloning an inconsistent region must fail"),
		Err(err) => err,
	};
	assert!(matches!(err, UnrollError::UnresolvedOperand(_)));
}
