use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnrollError {
	#[error("broken cfg invariant: {0}")]
	BrokenCfg(String),
	#[error("unresolved operand {0} while cloning")]
	UnresolvedOperand(String),
}

pub type Result<T, E = UnrollError> = std::result::Result<T, E>;
