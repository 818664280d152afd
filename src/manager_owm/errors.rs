use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwmError {
    #[error("http request error: {0}")]
    Request(String),
    #[error("OpenWeatherMap API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("json document error: {0}")]
    Document(String),
}

impl From<reqwest::Error> for OwmError {
    fn from(e: reqwest::Error) -> OwmError {
        OwmError::Request(e.to_string())
    }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> OwmError {
        OwmError::Document(e.to_string())
    }
}
