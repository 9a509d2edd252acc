#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed document: {0}")]
    Malformed(String),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<DeleteError> for WriteError {
    fn from(value: DeleteError) -> Self {
        match value {
            DeleteError::Storage(storage) => WriteError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("invalid document: {0}")]
    Invalid(String),
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<ReadError> for ImportError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Malformed(message) => ImportError::Invalid(message),
            ReadError::Storage(storage) => ImportError::Write(WriteError::Storage(storage)),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}
