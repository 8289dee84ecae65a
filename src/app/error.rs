use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostprintError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch posts: {0}")]
    Fetch(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Print error: {0}")]
    Print(String),

    #[error("Browser launch error: {0}")]
    Launch(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PostprintError>;
