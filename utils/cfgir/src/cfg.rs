use std::fmt::Display;

pub use crate::basicblock::{BasicBlock, LlvmNode};

pub struct CFG {
	pub blocks: Vec<LlvmNode>,
}

impl CFG {
	pub fn new(id: i32) -> Self {
		Self {
			blocks: vec![BasicBlock::new_node(id)],
		}
	}
	pub fn get_entry(&self) -> LlvmNode {
		self.blocks.first().unwrap().clone()
	}
	pub fn size(&self) -> usize {
		self.blocks.len()
	}
	/// Detach a block from all of its neighbours and drop it from the
	/// block list. The caller is responsible for having rerouted any
	/// control flow that still needs the block.
	pub fn remove_block(&mut self, bb: &LlvmNode) {
		let prevs = bb.borrow().prev.clone();
		for prev in prevs.iter() {
			prev.borrow_mut().succ.retain(|v| v != bb);
		}
		let succs = bb.borrow().succ.clone();
		for succ in succs.iter() {
			succ.borrow_mut().prev.retain(|v| v != bb);
		}
		bb.borrow_mut().prev.clear();
		bb.borrow_mut().succ.clear();
		self.blocks.retain(|v| v != bb);
	}
}

impl Display for CFG {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let blocks = self
			.blocks
			.iter()
			.map(|v| v.borrow().to_string())
			.collect::<Vec<_>>()
			.join("\n");
		write!(f, "{}", blocks)
	}
}

pub fn link_node(from: &LlvmNode, to: &LlvmNode) {
	if from.borrow().jump_instr.is_none() {
		from.borrow_mut().succ.push(to.clone());
		to.borrow_mut().prev.push(from.clone());
	}
}

pub fn force_link_node(from: &LlvmNode, to: &LlvmNode) {
	from.borrow_mut().succ.push(to.clone());
	to.borrow_mut().prev.push(from.clone());
}

pub fn unlink_node(from: &LlvmNode, to: &LlvmNode) {
	from.borrow_mut().succ.retain(|v| v != to);
	to.borrow_mut().prev.retain(|v| v != from);
}
