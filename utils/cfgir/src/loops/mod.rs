use std::{cell::RefCell, fmt::Display, rc::Rc};

use crate::basicblock::LlvmNode;

pub type LoopPtr = Rc<RefCell<Loop>>;

pub mod loop_analysis;

// Instances of this class are used to represent loops that are detected
// in the flow graph.
#[derive(Clone)]
pub struct Loop {
	pub outer: Option<LoopPtr>,
	pub header: LlvmNode,
	pub level: i32,
	pub no_inner: bool,
	pub subloops: Vec<LoopPtr>,
	// member blocks, header first, the rest in cfg layout order
	pub blocks: Vec<LlvmNode>,
}

impl Loop {
	pub fn new(header: LlvmNode) -> Self {
		Self {
			outer: None,
			header: header.clone(),
			level: -1,
			no_inner: true,
			subloops: Vec::new(),
			blocks: vec![header],
		}
	}
	pub fn contains(&self, bb: &LlvmNode) -> bool {
		self.blocks.contains(bb)
	}
	/// The unique predecessor of the header outside the loop, provided the
	/// header is its only successor. `None` means the loop has no usable
	/// preheader and transformations must leave it alone.
	pub fn get_loop_preheader(&self) -> Option<LlvmNode> {
		let header = self.header.borrow();
		let mut out_preds =
			header.prev.iter().filter(|v| !self.contains(v)).cloned();
		let preheader = out_preds.next()?;
		if out_preds.next().is_some() {
			return None;
		}
		if preheader.borrow().succ.len() != 1 {
			return None;
		}
		Some(preheader)
	}
	/// The unique in-loop predecessor of the header, i.e. the source of
	/// the back-edge.
	pub fn get_single_latch(&self) -> Option<LlvmNode> {
		let header = self.header.borrow();
		let mut in_preds =
			header.prev.iter().filter(|v| self.contains(v)).cloned();
		let latch = in_preds.next()?;
		if in_preds.next().is_some() {
			return None;
		}
		Some(latch)
	}
	/// The unique edge leaving the loop, as (exit block, exiting block).
	/// Any second leaving edge disqualifies the loop.
	pub fn get_single_exit(&self) -> Option<(LlvmNode, LlvmNode)> {
		let mut exit = None;
		for bb in self.blocks.iter() {
			for succ in bb.borrow().succ.iter() {
				if !self.contains(succ) {
					if exit.is_some() {
						return None;
					}
					exit = Some((succ.clone(), bb.clone()));
				}
			}
		}
		exit
	}
}

// Natural loops are identified by their header.
impl PartialEq for Loop {
	fn eq(&self, other: &Self) -> bool {
		self.header.borrow().id == other.header.borrow().id
	}
}

impl Eq for Loop {}

impl Display for Loop {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let outer = if let Some(outer) = &self.outer {
			format!("{}", outer.borrow().header.borrow().id)
		} else {
			"None".to_string()
		};
		write!(
			f,
			"outer: {}, header: {}, level: {}, no_inner: {}",
			outer,
			self.header.borrow().id,
			self.level,
			self.no_inner
		)
	}
}
