use std::{collections::HashMap, fmt::Display};

use utils::Label;

use crate::{llvmop::*, llvmvar::VarType, temp::LlvmTemp};

pub type LlvmInstr = Box<dyn LlvmInstrTrait>;

/// Instructions are held as trait objects so basic blocks can store a
/// heterogeneous list; `clone_box` gives them value semantics when a
/// transformation duplicates code.
pub trait LlvmInstrTrait: Display {
	fn get_read(&self) -> Vec<LlvmTemp> {
		Vec::new()
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		None
	}
	/// Replace reads of mapped temps by the mapped value. Definitions are
	/// left alone.
	fn map_temp(&mut self, _map: &HashMap<LlvmTemp, Value>) {}
	/// Replace every occurrence of mapped temps, definitions included.
	fn map_all_temp(&mut self, _map: &HashMap<LlvmTemp, LlvmTemp>) {}
	fn map_label(&mut self, _map: &HashMap<Label, Label>) {}
	fn get_variant(&self) -> LlvmInstrVariant;
	fn clone_box(&self) -> LlvmInstr;
}

impl Clone for LlvmInstr {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

pub enum LlvmInstrVariant<'a> {
	ArithInstr(&'a ArithInstr),
	CompInstr(&'a CompInstr),
	JumpInstr(&'a JumpInstr),
	JumpCondInstr(&'a JumpCondInstr),
	RetInstr(&'a RetInstr),
	AllocInstr(&'a AllocInstr),
	StoreInstr(&'a StoreInstr),
	LoadInstr(&'a LoadInstr),
	GEPInstr(&'a GEPInstr),
	CallInstr(&'a CallInstr),
}

#[derive(Clone)]
pub struct ArithInstr {
	pub target: LlvmTemp,
	pub op: ArithOp,
	pub var_type: VarType,
	pub lhs: Value,
	pub rhs: Value,
}

#[derive(Clone)]
pub struct CompInstr {
	pub kind: CompKind,
	pub target: LlvmTemp,
	pub op: CompOp,
	pub var_type: VarType,
	pub lhs: Value,
	pub rhs: Value,
}

#[derive(Clone)]
pub struct JumpInstr {
	pub target: Label,
}

impl JumpInstr {
	pub fn new(target: Label) -> LlvmInstr {
		Box::new(JumpInstr { target })
	}
}

#[derive(Clone)]
pub struct JumpCondInstr {
	pub var_type: VarType,
	pub cond: Value,
	pub target_true: Label,
	pub target_false: Label,
}

#[derive(Clone)]
pub struct RetInstr {
	pub value: Option<Value>,
}

#[derive(Clone)]
pub struct AllocInstr {
	pub target: LlvmTemp,
	pub var_type: VarType,
	pub length: Value,
}

#[derive(Clone)]
pub struct StoreInstr {
	pub value: Value,
	pub addr: Value,
}

#[derive(Clone)]
pub struct LoadInstr {
	pub target: LlvmTemp,
	pub var_type: VarType,
	pub addr: Value,
}

#[derive(Clone)]
pub struct GEPInstr {
	pub target: LlvmTemp,
	pub var_type: VarType,
	pub addr: Value,
	pub offset: Value,
}

#[derive(Clone)]
pub struct CallInstr {
	pub target: LlvmTemp,
	pub var_type: VarType,
	pub func: Label,
	pub params: Vec<(VarType, Value)>,
}
