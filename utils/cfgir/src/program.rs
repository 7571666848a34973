use std::fmt::Display;

use llvm::LlvmTempManager;

use crate::func::LlvmFunc;

pub struct LlvmProgram {
	pub funcs: Vec<LlvmFunc>,
	pub temp_mgr: LlvmTempManager,
}

impl LlvmProgram {
	pub fn new(funcs: Vec<LlvmFunc>, temp_mgr: LlvmTempManager) -> Self {
		Self { funcs, temp_mgr }
	}
}

impl Display for LlvmProgram {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		for func in &self.funcs {
			writeln!(f, "{}", func)?;
		}
		Ok(())
	}
}
