use std::{cell::RefCell, fmt::Display, rc::Rc};

use llvm::LlvmInstr;
use utils::Label;

pub type LlvmNode = Rc<RefCell<BasicBlock>>;

pub struct BasicBlock {
	pub id: i32,
	pub prev: Vec<LlvmNode>,
	pub succ: Vec<LlvmNode>,
	pub instrs: Vec<LlvmInstr>,
	pub jump_instr: Option<LlvmInstr>,
}

impl BasicBlock {
	pub fn new(id: i32) -> BasicBlock {
		BasicBlock {
			id,
			prev: Vec::new(),
			succ: Vec::new(),
			instrs: Vec::new(),
			jump_instr: None,
		}
	}
	pub fn new_node(id: i32) -> LlvmNode {
		Rc::new(RefCell::new(Self::new(id)))
	}
	pub fn label(&self) -> Label {
		match self.id {
			0 => Label::new("entry"),
			_ => Label::new(format!("B{}", self.id)),
		}
	}
	pub fn push(&mut self, instr: LlvmInstr) {
		self.instrs.push(instr);
	}
	pub fn set_jump(&mut self, instr: Option<LlvmInstr>) {
		self.jump_instr = instr;
	}
}

// Blocks are compared by identity; ids are unique within a function.
impl PartialEq for BasicBlock {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for BasicBlock {}

fn instr_format<T: Display>(v: T) -> String {
	format!("  {}", v)
}

impl Display for BasicBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let instrs = self
			.instrs
			.iter()
			.map(instr_format)
			.chain(self.jump_instr.iter().map(instr_format))
			.collect::<Vec<_>>()
			.join("\n");
		write!(f, "  {}:\n{}", self.label(), instrs)
	}
}
