//! CSS length strings to inches, for print margins.
//!
//! Chromium takes margins in inches while callers send CSS lengths such as
//! `"100px"` or `"2cm"`. Pixels are CSS pixels at 96 per inch.

pub const PIXELS_PER_INCH: f64 = 96.0;

const UNITS: [(&str, f64); 4] = [("px", 1.0), ("in", 96.0), ("cm", 37.8), ("mm", 3.78)];

/// Converts a CSS length to inches. Empty means zero, a bare number means pixels.
pub fn length_to_inches(length: &str) -> Result<f64, &'static str> {
    Ok(length_to_pixels(length)? / PIXELS_PER_INCH)
}

pub fn length_to_pixels(length: &str) -> Result<f64, &'static str> {
    let length = length.trim().to_ascii_lowercase();
    if length.is_empty() {
        return Ok(0.0);
    }
    let (number, factor) = match UNITS.iter().find(|(unit, _)| length.ends_with(unit)) {
        Some((unit, factor)) => (&length[..length.len() - unit.len()], *factor),
        None => (length.as_str(), 1.0),
    };
    let value: f64 = number.trim().parse().map_err(|_| "length is not a number with a px, in, cm or mm unit")?;
    if !value.is_finite() || value < 0.0 {
        return Err("length must be a finite, non-negative value");
    }
    Ok(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(length_to_inches("").unwrap(), 0.0);
        assert_eq!(length_to_inches("   ").unwrap(), 0.0);
        assert_eq!(length_to_inches("0px").unwrap(), 0.0);
    }

    #[test]
    fn converts_known_units() {
        assert!(close(length_to_inches("96px").unwrap(), 1.0));
        assert!(close(length_to_inches("100px").unwrap(), 100.0 / 96.0));
        assert!(close(length_to_inches("1in").unwrap(), 1.0));
        assert!(close(length_to_inches("2.54cm").unwrap(), 2.54 * 37.8 / 96.0));
        assert!(close(length_to_inches("10mm").unwrap(), 37.8 / 96.0));
    }

    #[test]
    fn bare_number_is_pixels() {
        assert!(close(length_to_pixels("48").unwrap(), 48.0));
        assert!(close(length_to_inches("48").unwrap(), 0.5));
    }

    #[test]
    fn tolerates_case_and_whitespace() {
        assert!(close(length_to_pixels(" 12 PX ").unwrap(), 12.0));
        assert!(close(length_to_pixels("1IN").unwrap(), 96.0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(length_to_inches("abc").is_err());
        assert!(length_to_inches("10pt").is_err());
        assert!(length_to_inches("px").is_err());
        assert!(length_to_inches("-5px").is_err());
        assert!(length_to_inches("NaNpx").is_err());
        assert!(length_to_inches("infpx").is_err());
    }
}
