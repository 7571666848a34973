use std::collections::HashMap;

use utils::Label;

use crate::{
	llvminstr::*,
	llvmop::Value,
	temp::LlvmTemp,
	utils_llvm::{map_label, map_temp, map_value, map_value_temp, read_temps},
};

impl std::fmt::Display for ArithInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} = {} {} {}, {}",
			self.target, self.op, self.var_type, self.lhs, self.rhs
		)
	}
}

impl LlvmInstrTrait for ArithInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.lhs, &self.rhs])
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.lhs, map);
		map_value(&mut self.rhs, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		map_value_temp(&mut self.lhs, map);
		map_value_temp(&mut self.rhs, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::ArithInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for CompInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} = {} {} {} {}, {}",
			self.target, self.kind, self.op, self.var_type, self.lhs, self.rhs
		)
	}
}

impl LlvmInstrTrait for CompInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.lhs, &self.rhs])
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.lhs, map);
		map_value(&mut self.rhs, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		map_value_temp(&mut self.lhs, map);
		map_value_temp(&mut self.rhs, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::CompInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for JumpInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "br label %{}", self.target)
	}
}

impl LlvmInstrTrait for JumpInstr {
	fn map_label(&mut self, map: &HashMap<Label, Label>) {
		map_label(&mut self.target, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::JumpInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for JumpCondInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"br {} {}, label %{}, label %{}",
			self.var_type, self.cond, self.target_true, self.target_false
		)
	}
}

impl LlvmInstrTrait for JumpCondInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.cond])
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.cond, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_value_temp(&mut self.cond, map);
	}
	fn map_label(&mut self, map: &HashMap<Label, Label>) {
		map_label(&mut self.target_true, map);
		map_label(&mut self.target_false, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::JumpCondInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for RetInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match &self.value {
			Some(v) => write!(f, "ret {} {}", v.get_type(), v),
			None => write!(f, "ret void"),
		}
	}
}

impl LlvmInstrTrait for RetInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		self.value.iter().filter_map(|v| v.unwrap_temp()).collect()
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		if let Some(v) = self.value.as_mut() {
			map_value(v, map);
		}
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		if let Some(v) = self.value.as_mut() {
			map_value_temp(v, map);
		}
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::RetInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for AllocInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} = alloca {}, {} {}",
			self.target,
			self.var_type,
			self.length.get_type(),
			self.length
		)
	}
}

impl LlvmInstrTrait for AllocInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.length])
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.length, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		map_value_temp(&mut self.length, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::AllocInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for StoreInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"store {} {}, {} {}",
			self.value.get_type(),
			self.value,
			self.addr.get_type(),
			self.addr
		)
	}
}

impl LlvmInstrTrait for StoreInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.value, &self.addr])
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.value, map);
		map_value(&mut self.addr, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_value_temp(&mut self.value, map);
		map_value_temp(&mut self.addr, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::StoreInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for LoadInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} = load {}, {} {}",
			self.target,
			self.var_type,
			self.addr.get_type(),
			self.addr
		)
	}
}

impl LlvmInstrTrait for LoadInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.addr])
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.addr, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		map_value_temp(&mut self.addr, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::LoadInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for GEPInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} = getelementptr {}, {} {}, {} {}",
			self.target,
			self.var_type,
			self.addr.get_type(),
			self.addr,
			self.offset.get_type(),
			self.offset
		)
	}
}

impl LlvmInstrTrait for GEPInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		read_temps(&[&self.addr, &self.offset])
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		map_value(&mut self.addr, map);
		map_value(&mut self.offset, map);
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		map_value_temp(&mut self.addr, map);
		map_value_temp(&mut self.offset, map);
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::GEPInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}

impl std::fmt::Display for CallInstr {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let params: Vec<_> = self
			.params
			.iter()
			.map(|(var_type, value)| format!("{} {}", var_type, value))
			.collect();
		write!(
			f,
			"{} = call {} @{}({})",
			self.target,
			self.var_type,
			self.func,
			params.join(", ")
		)
	}
}

impl LlvmInstrTrait for CallInstr {
	fn get_read(&self) -> Vec<LlvmTemp> {
		self.params.iter().filter_map(|(_, v)| v.unwrap_temp()).collect()
	}
	fn get_write(&self) -> Option<LlvmTemp> {
		Some(self.target.clone())
	}
	fn map_temp(&mut self, map: &HashMap<LlvmTemp, Value>) {
		for (_, v) in self.params.iter_mut() {
			map_value(v, map);
		}
	}
	fn map_all_temp(&mut self, map: &HashMap<LlvmTemp, LlvmTemp>) {
		map_temp(&mut self.target, map);
		for (_, v) in self.params.iter_mut() {
			map_value_temp(v, map);
		}
	}
	fn get_variant(&self) -> LlvmInstrVariant {
		LlvmInstrVariant::CallInstr(self)
	}
	fn clone_box(&self) -> LlvmInstr {
		Box::new(self.clone())
	}
}
