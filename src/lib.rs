pub mod error;
pub mod process;

pub use error::{ParseFailure, ResetError};
pub use process::reset::{reset_column, ResetSummary};
pub use process::Table;
