pub mod config;
pub mod error;
pub mod types;

pub use config::{parse_plies, SearchConfig};
pub use error::{Result, SkirmishError};
pub use types::{Side, Turn, UnitId};
