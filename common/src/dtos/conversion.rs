use serde::{Deserialize, Serialize};

use crate::util::serialize::null_as_empty;

/// Body of `POST /convert`.
///
/// Only `pdfBody` is required; the header/footer fields default to empty
/// strings whether they are absent or `null`, and an empty height is zero.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub pdf_body: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub header_html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub footer_html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub header_height: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub footer_height: String,
}

impl ConversionRequest {
    pub fn new(pdf_body: impl Into<String>) -> Self {
        ConversionRequest {
            pdf_body: pdf_body.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, html: impl Into<String>, height: impl Into<String>) -> Self {
        self.header_html = html.into();
        self.header_height = height.into();
        self
    }

    pub fn with_footer(mut self, html: impl Into<String>, height: impl Into<String>) -> Self {
        self.footer_html = html.into();
        self.footer_height = height.into();
        self
    }

    pub fn has_header_footer(&self) -> bool {
        !self.header_html.trim().is_empty() || !self.footer_html.trim().is_empty()
    }
}
