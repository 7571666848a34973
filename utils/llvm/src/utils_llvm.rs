use std::collections::HashMap;

use utils::Label;

use crate::{llvmop::Value, temp::LlvmTemp};

pub fn map_value(v: &mut Value, map: &HashMap<LlvmTemp, Value>) {
	if let Value::Temp(t) = v {
		if let Some(new) = map.get(t) {
			*v = new.clone();
		}
	}
}

pub fn map_value_temp(v: &mut Value, map: &HashMap<LlvmTemp, LlvmTemp>) {
	if let Value::Temp(t) = v {
		if let Some(new) = map.get(t) {
			*v = Value::Temp(new.clone());
		}
	}
}

pub fn map_temp(t: &mut LlvmTemp, map: &HashMap<LlvmTemp, LlvmTemp>) {
	if let Some(new) = map.get(t) {
		*t = new.clone();
	}
}

pub fn map_label(l: &mut Label, map: &HashMap<Label, Label>) {
	if let Some(new) = map.get(l) {
		*l = new.clone();
	}
}

pub fn read_temps(values: &[&Value]) -> Vec<LlvmTemp> {
	values.iter().filter_map(|v| v.unwrap_temp()).collect()
}
