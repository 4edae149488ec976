use thiserror::Error;

/// Why a render failed. Only ever logged; callers of the endpoint see a bare 500.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not launch browser: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("page did not reach {0} within {1}s")]
    NavigationTimeout(&'static str, u64),

    #[error("printing to pdf failed: {0}")]
    Print(String),

    #[error("invalid {0}: {1}")]
    InvalidLength(&'static str, &'static str),

    #[error("renderer produced an empty document")]
    EmptyDocument,
}

impl From<chromiumoxide::error::CdpError> for RenderError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        RenderError::Navigation(err.to_string())
    }
}
