//! Type definitions for eth008

pub mod error;
pub mod module_info;
pub mod outputs;

pub use error::{Error, Result};
pub use module_info::ModuleInfo;
pub use outputs::{OutputIndex, OutputStates};
