use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartFrameError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Parse int error: {0}")]
    ParseIntError(#[from] ParseIntError),

    #[error("Parse float error: {0}")]
    ParseFloatError(#[from] ParseFloatError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, ChartFrameError>;

// 用于从字符串创建错误
impl From<String> for ChartFrameError {
    fn from(s: String) -> Self {
        ChartFrameError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for ChartFrameError {
    fn from(s: &str) -> Self {
        ChartFrameError::Unknown(s.to_string())
    }
}
