use std::result::Result as StdResult;
use thiserror::Error;

/// Errors raised while bringing up test containers.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("Container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("MySQL did not accept connections after {attempts} attempts: {source}")]
    NotReady {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

pub type Result<T> = StdResult<T, TestInfraError>;
