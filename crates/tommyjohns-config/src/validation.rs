//! Validation helpers and regex patterns

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::SocketAddr;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern"));

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Validate a listen address such as `127.0.0.1:5000`
pub fn validate_bind_address(address: &str) -> Result<(), ValidationError> {
    address
        .parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_bind_address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#1f77b4"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("devstuff/TJList.csv").is_ok());
        assert!(validate_file_path("C:\\data\\tj.db").is_ok());
        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("charts/<name>").is_err());
    }

    #[test]
    fn test_validate_bind_address() {
        assert!(validate_bind_address("127.0.0.1:5000").is_ok());
        assert!(validate_bind_address("[::1]:8080").is_ok());
        assert!(validate_bind_address("localhost:5000").is_err());
        assert!(validate_bind_address("127.0.0.1").is_err());
    }
}
