#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("backend answered {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
