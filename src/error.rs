
use thiserror::Error;

use crate::construct::Thing;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StratumError {
    #[error("No consistent linearization for thing {0}")]
    InconsistentHierarchy(Thing),
    #[error("Key not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StratumError>;
