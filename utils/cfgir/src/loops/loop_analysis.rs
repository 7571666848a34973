use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
	basicblock::LlvmNode, cfg::CFG, dominator::DomTree, loops::LoopPtr,
};

use super::Loop;

impl CFG {
	/// Discover every natural loop of the graph. All analysis state lives
	/// in this call; nothing is cached on the blocks, so the result is
	/// only valid until the CFG is next mutated.
	pub fn loop_analysis(&self) -> Vec<LoopPtr> {
		let dom = DomTree::new(self);
		let mut loop_map: HashMap<i32, LoopPtr> = HashMap::new();
		let mut loops = Vec::new();
		loop_dfs(self.get_entry(), &dom, &mut loop_map, &mut loops);
		for loop_ in loops.iter() {
			calc_loop_level(Some(loop_.clone()));
		}
		// member lists: every block joins its innermost loop and all the
		// loops enclosing it
		for bb in self.blocks.iter() {
			let mut cur = loop_map.get(&bb.borrow().id).cloned();
			while let Some(l) = cur {
				if !l.borrow().contains(bb) {
					l.borrow_mut().blocks.push(bb.clone());
				}
				cur = l.borrow().outer.clone();
			}
		}
		loops
	}
}

fn calc_loop_level(loop_: Option<LoopPtr>) {
	if let Some(l) = loop_ {
		if l.borrow().level != -1 {
			return;
		}
		let outer = l.borrow().outer.clone();
		if let Some(outer) = outer {
			calc_loop_level(Some(outer.clone()));
			l.borrow_mut().level = outer.borrow().level + 1;
		} else {
			l.borrow_mut().level = 1;
		}
	}
}

// Post-order walk of the dominator tree: inner loops are built before the
// loops enclosing them, so subsuming an already-assigned block links the
// two levels together.
fn loop_dfs(
	cur_bb: LlvmNode,
	dom: &DomTree,
	loop_map: &mut HashMap<i32, LoopPtr>,
	loops: &mut Vec<LoopPtr>,
) {
	let cur_id = cur_bb.borrow().id;
	for next in dom.dom_direct.get(&cur_id).cloned().unwrap_or_default() {
		loop_dfs(next, dom, loop_map, loops);
	}
	// a predecessor dominated by cur_bb closes a back-edge onto it
	let mut bbs: Vec<LlvmNode> = cur_bb
		.borrow()
		.prev
		.iter()
		.filter(|prev| dom.dominates(&cur_bb, prev))
		.cloned()
		.collect();
	if bbs.is_empty() {
		return;
	}
	let new_loop = Rc::new(RefCell::new(Loop::new(cur_bb.clone())));
	while let Some(bb) = bbs.pop() {
		let bb_id = bb.borrow().id;
		match loop_map.get(&bb_id).cloned() {
			None => {
				loop_map.insert(bb_id, new_loop.clone());
				if bb_id != cur_id {
					bbs.extend(bb.borrow().prev.iter().cloned());
				}
			}
			Some(inner) => {
				let mut outermost = inner;
				loop {
					let outer = outermost.borrow().outer.clone();
					match outer {
						Some(outer) => outermost = outer,
						None => break,
					}
				}
				if outermost == new_loop {
					continue;
				}
				new_loop.borrow_mut().no_inner = false;
				outermost.borrow_mut().outer = Some(new_loop.clone());
				new_loop.borrow_mut().subloops.push(outermost.clone());
				let header_prev =
					outermost.borrow().header.borrow().prev.clone();
				bbs.extend(header_prev);
			}
		}
	}
	loops.push(new_loop);
}
