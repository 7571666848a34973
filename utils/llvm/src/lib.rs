pub mod llvminstr;
pub mod llvmop;
pub mod llvmvar;
pub mod temp;

mod impls;
mod utils_llvm;

pub use llvminstr::*;
pub use llvmop::*;
pub use llvmvar::*;
pub use temp::*;
