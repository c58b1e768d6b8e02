use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("couldn't render a page fragment: {0}")]
    Render(#[from] askama::Error),
}

pub type SiteResult<T> = Result<T, SiteError>;
