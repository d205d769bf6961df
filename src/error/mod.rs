mod types;

pub use types::{MadiError, Result};
