use std::str::FromStr;

use common::dtos::ConversionRequest;

use crate::error::RenderError;

pub mod chromium;

mod options;
pub use options::*;

#[async_trait::async_trait]
pub trait IPdfRenderer: Send + Sync {
    async fn render(&self, request: &ConversionRequest) -> Result<Vec<u8>, RenderError>;
}

/// Page lifecycle event that ends the navigation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    Load,
    /// No in-flight requests for 500ms.
    NetworkIdle,
    /// At most two in-flight requests for 500ms.
    NetworkAlmostIdle,
}

impl WaitUntil {
    pub fn lifecycle_event(&self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::NetworkIdle => "networkIdle",
            WaitUntil::NetworkAlmostIdle => "networkAlmostIdle",
        }
    }
}

impl FromStr for WaitUntil {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "load" => Ok(WaitUntil::Load),
            "networkidle0" | "networkidle" => Ok(WaitUntil::NetworkIdle),
            "networkidle2" | "networkalmostidle" => Ok(WaitUntil::NetworkAlmostIdle),
            _ => Err("unknown wait condition"),
        }
    }
}
