mod contracted;
mod functions;
mod set;
mod shell;

pub use contracted::{ContractedGaussian, ContractedGaussianBuilder, ContractionError};
pub use functions::{Angular, PrimitiveGaussian};
pub use set::BasisTable;
pub use shell::{Shell, ShellType, UnknownShellType};
