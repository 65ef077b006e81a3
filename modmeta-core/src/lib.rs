pub mod error;
pub mod field;
pub mod format;
pub mod module;

pub use error::{Error, Result};
pub use field::*;
pub use format::*;
pub use module::*;
