#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid position: share count must be positive, got {shares}")]
    InvalidPosition { shares: u32 },

    #[error("invalid contract count: {0}")]
    InvalidContracts(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
