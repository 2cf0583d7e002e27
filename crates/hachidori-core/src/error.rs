use hachidori_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HachidoriError {
    #[error("could not retrieve library: {0}")]
    ListFetch(#[from] ApiError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
