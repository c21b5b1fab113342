use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown chart key: `{key}`")]
    UnknownChart { key: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series `{id}` is not loaded")]
    SeriesNotLoaded { id: String },

    #[error("failed to fetch series `{id}`: {reason}")]
    FetchFailed { id: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
