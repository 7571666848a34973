use std::collections::HashMap;

use cfgir::basicblock::LlvmNode;
use log::trace;
use utils::{errors::Result, UnrollError};

/// Successor rewrites, planned first and applied in one batch so no
/// successor list is mutated while it is still being read as a planning
/// source. Each entry moves one edge `from -> old_to` over to `new_to`,
/// keeping `prev` lists and the terminator label in step.
#[derive(Default)]
pub struct EdgePlan {
	retargets: Vec<(LlvmNode, LlvmNode, LlvmNode)>,
}

impl EdgePlan {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn retarget(
		&mut self,
		from: &LlvmNode,
		old_to: &LlvmNode,
		new_to: &LlvmNode,
	) {
		self.retargets.push((from.clone(), old_to.clone(), new_to.clone()));
	}
	pub fn apply(self) -> Result<()> {
		for (from, old_to, new_to) in self.retargets {
			trace!(
				"retarget {}: {} -> {}",
				from.borrow().label(),
				old_to.borrow().label(),
				new_to.borrow().label()
			);
			let pos = from
				.borrow()
				.succ
				.iter()
				.position(|v| *v == old_to)
				.ok_or_else(|| {
					UnrollError::BrokenCfg(format!(
						"{} is not a successor of {}",
						old_to.borrow().label(),
						from.borrow().label()
					))
				})?;
			from.borrow_mut().succ[pos] = new_to.clone();
			old_to.borrow_mut().prev.retain(|v| *v != from);
			new_to.borrow_mut().prev.push(from.clone());
			let mut label_map = HashMap::new();
			label_map
				.insert(old_to.borrow().label(), new_to.borrow().label());
			if let Some(jump) = from.borrow_mut().jump_instr.as_mut() {
				jump.map_label(&label_map);
			}
		}
		Ok(())
	}
}
