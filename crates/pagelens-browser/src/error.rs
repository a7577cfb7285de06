use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Performance audit failed: {0}")]
    Audit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for pagelens_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Navigation(msg) => pagelens_core::Error::Navigation(msg),
            Error::Audit(msg) => pagelens_core::Error::Audit(msg),
            Error::Http(e) => pagelens_core::Error::Audit(e.to_string()),
            other => pagelens_core::Error::Collection(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_maps_to_core_navigation() {
        let core: pagelens_core::Error = Error::Navigation("timed out after 45s".into()).into();
        assert!(matches!(core, pagelens_core::Error::Navigation(_)));
    }

    #[test]
    fn test_cdp_maps_to_collection() {
        let core: pagelens_core::Error = Error::Cdp("target closed".into()).into();
        assert!(matches!(core, pagelens_core::Error::Collection(msg) if msg.contains("target closed")));
    }
}
