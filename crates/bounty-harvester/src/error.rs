use bounty_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("harvest aborted: {0}")]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
