pub mod context;
pub mod error;

pub use context::{AppContext, RunOptions};
pub use error::{PostprintError, Result};
