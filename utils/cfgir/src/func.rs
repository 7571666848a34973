use std::fmt::Display;

use llvm::{Value, VarType};

use crate::cfg::{BasicBlock, CFG};

pub struct LlvmFunc {
	// Counts the basic blocks ever created for this function: total + 1 is
	// the next fresh id. Not equal to cfg.blocks.len() because blocks may
	// have been deleted.
	pub total: i32,
	pub cfg: CFG,
	pub name: String,
	pub ret_type: VarType,
	pub params: Vec<Value>,
}

impl LlvmFunc {
	pub fn new_basicblock(&mut self) -> BasicBlock {
		self.total += 1;
		BasicBlock::new(self.total)
	}
}

impl Display for LlvmFunc {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let params: Vec<_> = self
			.params
			.iter()
			.map(|v| format!("{} {}", v.get_type(), v))
			.collect();
		write!(
			f,
			"define {} @{}({}) {{\n{}\n}}",
			self.ret_type,
			self.name,
			params.join(", "),
			self.cfg
		)
	}
}
