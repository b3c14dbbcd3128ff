//! Human-readable byte quantities ("512KB", "4MB", "1024").

use super::error::SizeError;

const KIB: f64 = 1024.0;

/// Parse a size like `512KB`, `4MB`, `1.5GB` or a raw byte count
///
/// Suffixes are case-insensitive powers of 1024. A suffixed value may be
/// fractional and is truncated to whole bytes; a bare value must be an
/// integer.
///
/// # Errors
/// * `SizeError::Empty` - Blank input
/// * `SizeError::InvalidNumber` - Numeric part does not parse
/// * `SizeError::Negative` - Quantity below zero
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let s = input.trim().to_ascii_uppercase();
    if s.is_empty() {
        return Err(SizeError::Empty);
    }

    let scaled = [("KB", KIB), ("MB", KIB * KIB), ("GB", KIB * KIB * KIB)]
        .iter()
        .find_map(|(suffix, scale)| s.strip_suffix(suffix).map(|num| (num, *scale)));

    match scaled {
        Some((num, scale)) => {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| SizeError::InvalidNumber(input.to_string()))?;
            if !value.is_finite() {
                return Err(SizeError::InvalidNumber(input.to_string()));
            }
            if value < 0.0 {
                return Err(SizeError::Negative(input.to_string()));
            }
            Ok((value * scale) as u64)
        }
        None => {
            if s.starts_with('-') {
                return Err(SizeError::Negative(input.to_string()));
            }
            s.parse::<u64>()
                .map_err(|_| SizeError::InvalidNumber(input.to_string()))
        }
    }
}
