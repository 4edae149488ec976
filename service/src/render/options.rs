use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use common::{dtos::ConversionRequest, util::units::length_to_inches};

use crate::error::RenderError;

pub const A4_WIDTH_INCHES: f64 = 8.27;
pub const A4_HEIGHT_INCHES: f64 = 11.7;

// Chromium falls back to its date/title template when one side is empty.
const EMPTY_TEMPLATE: &str = "<span></span>";

/// Print settings for one conversion: A4, backgrounds on, side margins zero,
/// top and bottom margins reserved for the header and footer.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PdfOptions {
    pub fn from_request(request: &ConversionRequest) -> Result<Self, RenderError> {
        let margin_top = length_to_inches(&request.header_height).map_err(|e| RenderError::InvalidLength("headerHeight", e))?;
        let margin_bottom = length_to_inches(&request.footer_height).map_err(|e| RenderError::InvalidLength("footerHeight", e))?;
        let display_header_footer = request.has_header_footer();
        let template = |html: &str| {
            if display_header_footer && html.trim().is_empty() {
                EMPTY_TEMPLATE.to_string()
            } else {
                html.to_string()
            }
        };
        Ok(PdfOptions {
            display_header_footer,
            header_template: template(&request.header_html),
            footer_template: template(&request.footer_html),
            margin_top,
            margin_bottom,
        })
    }

    pub fn to_params(&self) -> PrintToPdfParams {
        let (header_template, footer_template) = if self.display_header_footer {
            (Some(self.header_template.clone()), Some(self.footer_template.clone()))
        } else {
            (None, None)
        };
        PrintToPdfParams {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_INCHES),
            paper_height: Some(A4_HEIGHT_INCHES),
            display_header_footer: Some(self.display_header_footer),
            header_template,
            footer_template,
            margin_top: Some(self.margin_top),
            margin_bottom: Some(self.margin_bottom),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_body_has_no_header_footer_and_zero_margins() {
        let params = PdfOptions::from_request(&ConversionRequest::new("<h1>Hello</h1>")).unwrap().to_params();
        assert_eq!(params.display_header_footer, Some(false));
        assert_eq!(params.header_template, None);
        assert_eq!(params.footer_template, None);
        assert_eq!(params.margin_top, Some(0.0));
        assert_eq!(params.margin_bottom, Some(0.0));
        assert_eq!(params.margin_left, Some(0.0));
        assert_eq!(params.margin_right, Some(0.0));
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.paper_width, Some(A4_WIDTH_INCHES));
        assert_eq!(params.paper_height, Some(A4_HEIGHT_INCHES));
    }

    #[test]
    fn margins_follow_header_and_footer_heights() {
        let request = ConversionRequest::new("<p>body</p>")
            .with_header("<div>Header</div>", "96px")
            .with_footer("<div>Footer</div>", "48px");
        let params = PdfOptions::from_request(&request).unwrap().to_params();
        assert_eq!(params.display_header_footer, Some(true));
        assert_eq!(params.header_template.as_deref(), Some("<div>Header</div>"));
        assert_eq!(params.footer_template.as_deref(), Some("<div>Footer</div>"));
        assert_eq!(params.margin_top, Some(1.0));
        assert_eq!(params.margin_bottom, Some(0.5));
    }

    #[test]
    fn missing_side_gets_blank_template() {
        let request = ConversionRequest::new("<p>body</p>").with_footer("<span class=\"pageNumber\"></span>", "1in");
        let options = PdfOptions::from_request(&request).unwrap();
        assert!(options.display_header_footer);
        assert_eq!(options.header_template, EMPTY_TEMPLATE);
        assert_eq!(options.margin_top, 0.0);
        assert_eq!(options.margin_bottom, 1.0);
    }

    #[test]
    fn invalid_height_is_reported_by_field() {
        let request = ConversionRequest::new("x").with_header("<b>h</b>", "tall");
        match PdfOptions::from_request(&request) {
            Err(RenderError::InvalidLength(field, _)) => assert_eq!(field, "headerHeight"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
