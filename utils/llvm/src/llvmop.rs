use std::fmt::Display;

use crate::{llvmvar::VarType, temp::LlvmTemp};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Int(i32),
	Float(f32),
	Temp(LlvmTemp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
	Add,
	Sub,
	Div,
	Mul,
	// modulo
	Rem,
	// Float add
	Fadd,
	// Float sub
	Fsub,
	// Float div
	Fdiv,
	// Float mul
	Fmul,
	// shift left
	Shl,
	// logical shift right
	Lshr,
	// arithmetic shift right
	Ashr,
	And,
	Or,
	Xor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompOp {
	EQ,
	NE,
	// signed greater than
	SGT,
	// signed greater or equal
	SGE,
	// signed less than
	SLT,
	// signed less or equal
	SLE,
	// ordered and less than
	OLT,
	// ordered and less or equal
	OLE,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompKind {
	Icmp,
	Fcmp,
}

impl Value {
	pub fn get_type(&self) -> VarType {
		match self {
			Self::Int(_) => VarType::I32,
			Self::Float(_) => VarType::F32,
			Self::Temp(v) => v.var_type,
		}
	}
	pub fn unwrap_temp(&self) -> Option<LlvmTemp> {
		match self {
			Self::Temp(v) => Some(v.clone()),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{}", v),
			Self::Float(v) => write!(f, "{}", v),
			Self::Temp(v) => write!(f, "{}", v),
		}
	}
}

impl Display for ArithOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let op_str = match self {
			Self::Add => "add",
			Self::Sub => "sub",
			Self::Div => "sdiv",
			Self::Mul => "mul",
			Self::Rem => "srem",
			Self::Fadd => "fadd",
			Self::Fsub => "fsub",
			Self::Fdiv => "fdiv",
			Self::Fmul => "fmul",
			Self::Shl => "shl",
			Self::Lshr => "lshr",
			Self::Ashr => "ashr",
			Self::And => "and",
			Self::Or => "or",
			Self::Xor => "xor",
		};
		write!(f, "{}", op_str)
	}
}

impl Display for CompOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let op_str = match self {
			Self::EQ => "eq",
			Self::NE => "ne",
			Self::SGT => "sgt",
			Self::SGE => "sge",
			Self::SLT => "slt",
			Self::SLE => "sle",
			Self::OLT => "olt",
			Self::OLE => "ole",
		};
		write!(f, "{}", op_str)
	}
}

impl Display for CompKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Icmp => write!(f, "icmp"),
			Self::Fcmp => write!(f, "fcmp"),
		}
	}
}
