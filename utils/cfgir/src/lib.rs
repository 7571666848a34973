pub mod basicblock;
pub mod cfg;
pub mod dominator;
pub mod func;
pub mod loops;
pub mod program;

pub use basicblock::{BasicBlock, LlvmNode};
pub use cfg::CFG;
