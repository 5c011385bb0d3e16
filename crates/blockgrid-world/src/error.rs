use blockgrid_chunk::ChunkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode blob: {0}")]
    Encode(#[from] bincode::Error),
    #[error("corrupt blob: {reason}")]
    Corrupt { reason: String },
    #[error("blob references unknown block id {0}")]
    UnknownBlockId(u16),
}

impl StorageError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
