use thiserror::Error;

/// Failure of one detector call. Fatal to that image or frame only.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("failed to read image {image}: {source}")]
    Io {
        image: String,
        #[source]
        source: std::io::Error,
    },

    #[error("detector request for {image} failed: {source}")]
    Request {
        image: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("detector returned HTTP {status} for {image}: {body}")]
    Status {
        image: String,
        status: u16,
        body: String,
    },

    #[error("malformed detector response for {image}: missing or invalid `{field}`")]
    Malformed { image: String, field: String },
}

impl DetectorError {
    pub fn malformed(image: &str, field: impl Into<String>) -> Self {
        DetectorError::Malformed {
            image: image.to_string(),
            field: field.into(),
        }
    }
}
