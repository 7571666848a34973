use std::{
	cell::RefCell,
	collections::{HashMap, HashSet},
	rc::Rc,
};

use cfgir::{basicblock::LlvmNode, func::LlvmFunc};
use llvm::{
	ArithInstr, ArithOp, LlvmInstr, LlvmInstrVariant, LlvmTemp,
	LlvmTempManager, Value, VarType,
};
use log::trace;
use utils::{errors::Result, Label, UnrollError};

/// Maps original values to their clones within one duplication pass.
///
/// `map` carries plain definition renames; `adjusted` redirects a cloned
/// counter load to the add that applies its generation offset. Operands
/// are rewritten through both in that order, so a reference to a counter
/// load always lands on the final, adjusted clone.
#[derive(Default)]
pub struct ValueMap {
	map: HashMap<LlvmTemp, LlvmTemp>,
	adjusted: HashMap<LlvmTemp, LlvmTemp>,
}

/// One structural copy of a block region. `block_map` is only ever used
/// to rewrite successor edges, never instruction operands.
pub struct RegionClone {
	pub blocks: Vec<LlvmNode>,
	block_map: HashMap<i32, LlvmNode>,
}

impl RegionClone {
	pub fn get(&self, origin: &LlvmNode) -> LlvmNode {
		self.block_map[&origin.borrow().id].clone()
	}
}

fn clone_instr(
	instr: &LlvmInstr,
	vmap: &mut ValueMap,
	region_defs: &HashSet<LlvmTemp>,
	temp_mgr: &mut LlvmTempManager,
) -> Result<LlvmInstr> {
	// an operand defined inside the region must already have a clone;
	// anything else means the graph we were handed is inconsistent
	for t in instr.get_read() {
		if region_defs.contains(&t) && !vmap.map.contains_key(&t) {
			return Err(UnrollError::UnresolvedOperand(t.to_string()));
		}
	}
	if let Some(write) = instr.get_write() {
		let fresh = temp_mgr.new_temp(write.var_type);
		vmap.map.insert(write, fresh);
	}
	let mut copy = instr.clone_box();
	copy.map_all_temp(&vmap.map);
	copy.map_all_temp(&vmap.adjusted);
	Ok(copy)
}

/// Deep-copy `region` once. Instructions get fresh target temps, operands
/// follow their clones, internal successor edges are redirected onto the
/// copies while edges leaving the region keep their original target.
///
/// With `counter_adjust` set, every cloned load of the counter slot is
/// followed by an add of the generation offset and later uses inside the
/// copy read the adjusted value instead.
pub fn clone_region(
	func: &mut LlvmFunc,
	region: &[LlvmNode],
	vmap: &mut ValueMap,
	temp_mgr: &mut LlvmTempManager,
	counter_adjust: Option<(&LlvmTemp, i32)>,
) -> Result<RegionClone> {
	let region_defs: HashSet<LlvmTemp> = region
		.iter()
		.flat_map(|bb| {
			bb.borrow()
				.instrs
				.iter()
				.filter_map(|instr| instr.get_write())
				.collect::<Vec<_>>()
		})
		.collect();

	let mut blocks = Vec::new();
	let mut block_map = HashMap::new();
	let mut label_map: HashMap<Label, Label> = HashMap::new();
	for bb in region.iter() {
		let new_bb = Rc::new(RefCell::new(func.new_basicblock()));
		trace!(
			"clone {} as {}",
			bb.borrow().label(),
			new_bb.borrow().label()
		);
		label_map.insert(bb.borrow().label(), new_bb.borrow().label());
		block_map.insert(bb.borrow().id, new_bb.clone());
		blocks.push(new_bb);
	}

	for bb in region.iter() {
		let new_bb = block_map[&bb.borrow().id].clone();
		let mut new_instrs = Vec::new();
		for instr in bb.borrow().instrs.iter() {
			let copy = clone_instr(instr, vmap, &region_defs, temp_mgr)?;
			new_instrs.push(copy);
			if let Some((counter, offset)) = counter_adjust {
				if let LlvmInstrVariant::LoadInstr(load) = instr.get_variant()
				{
					if load.addr == Value::Temp(counter.clone()) {
						let loaded =
							new_instrs.last().unwrap().get_write().unwrap();
						let adjusted = temp_mgr.new_temp(VarType::I32);
						new_instrs.push(Box::new(ArithInstr {
							target: adjusted.clone(),
							op: ArithOp::Add,
							var_type: VarType::I32,
							lhs: Value::Temp(loaded.clone()),
							rhs: Value::Int(offset),
						}));
						vmap.adjusted.insert(loaded, adjusted);
					}
				}
			}
		}
		let new_jump = bb.borrow().jump_instr.as_ref().map(|jump| {
			let mut copy = jump.clone_box();
			copy.map_all_temp(&vmap.map);
			copy.map_all_temp(&vmap.adjusted);
			copy.map_label(&label_map);
			copy
		});
		new_bb.borrow_mut().instrs = new_instrs;
		new_bb.borrow_mut().set_jump(new_jump);
	}

	// successor edges: internal ones land on the sibling clone, edges out
	// of the region keep pointing at the original target until the
	// stitcher reroutes them
	for bb in region.iter() {
		let new_bb = block_map[&bb.borrow().id].clone();
		let new_succ: Vec<LlvmNode> = bb
			.borrow()
			.succ
			.iter()
			.map(|succ| {
				block_map
					.get(&succ.borrow().id)
					.cloned()
					.unwrap_or_else(|| succ.clone())
			})
			.collect();
		for succ in new_succ.iter() {
			succ.borrow_mut().prev.push(new_bb.clone());
		}
		new_bb.borrow_mut().succ = new_succ;
	}

	Ok(RegionClone { blocks, block_map })
}

/// Copy the loop body `times` times. Generation `i` (1-indexed) reads the
/// counter slot offset by `i`, matching the iteration it stands for. One
/// `ValueMap` persists over the whole call, so a clone's operands resolve
/// to the newest generation of whatever they referenced.
pub fn duplicate_body(
	func: &mut LlvmFunc,
	body: &[LlvmNode],
	times: usize,
	counter: &LlvmTemp,
	temp_mgr: &mut LlvmTempManager,
) -> Result<Vec<RegionClone>> {
	let mut vmap = ValueMap::default();
	let mut chain = Vec::new();
	for i in 1..=times {
		let clone = clone_region(
			func,
			body,
			&mut vmap,
			temp_mgr,
			Some((counter, i as i32)),
		)?;
		chain.push(clone);
	}
	Ok(chain)
}

/// Copy a whole loop verbatim, back-edge included. Used to build the
/// remainder loop of partial unrolling, so no counter adjustment.
pub fn clone_loop(
	func: &mut LlvmFunc,
	blocks: &[LlvmNode],
	temp_mgr: &mut LlvmTempManager,
) -> Result<RegionClone> {
	let mut vmap = ValueMap::default();
	clone_region(func, blocks, &mut vmap, temp_mgr, None)
}
