//! Holiday adapter error types.

use offhours_domain::error::OffhoursError;

/// Failures while fetching or decoding the holiday document.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    #[error("holiday URL template has no {{year}} placeholder: {0}")]
    MissingPlaceholder(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed holiday document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<HolidayError> for OffhoursError {
    fn from(err: HolidayError) -> Self {
        OffhoursError::upstream("holidays", err)
    }
}
