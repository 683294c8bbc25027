pub mod relay;

pub use relay::{Brand, RelayNumber, TriggerOutcome, TriggerRequest};

/// 领域层错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("unsupported brand for relay control: {0}")]
    UnsupportedBrand(String),
    #[error("invalid relay number text: {0:?}")]
    InvalidRelayText(String),
}
