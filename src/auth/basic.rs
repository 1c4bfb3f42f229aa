//! Basic authorization header parsing

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const BASIC_PREFIX: &str = "Basic ";

/// Why a header could not be turned into credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthError {
    Missing,
    InvalidFormat,
}

impl BasicAuthError {
    pub fn message(&self) -> &'static str {
        match self {
            BasicAuthError::Missing => "Authorization header is required",
            BasicAuthError::InvalidFormat => "Invalid authorization header format",
        }
    }
}

/// Decodes `Basic base64(username:password)`.
///
/// The decoded text must split on `:` into exactly two non-empty parts.
pub fn parse_basic_auth(header: Option<&str>) -> Result<(String, String), BasicAuthError> {
    let header = header.ok_or(BasicAuthError::Missing)?;

    let encoded = header
        .strip_prefix(BASIC_PREFIX)
        .ok_or(BasicAuthError::InvalidFormat)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::InvalidFormat)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidFormat)?;

    let parts: Vec<&str> = decoded.split(':').collect();
    match parts.as_slice() {
        [username, password] if !username.is_empty() && !password.is_empty() => {
            Ok((username.to_string(), password.to_string()))
        }
        _ => Err(BasicAuthError::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_valid_header() {
        let parsed = parse_basic_auth(Some(&header("alice:secret1"))).unwrap();
        assert_eq!(parsed, ("alice".to_string(), "secret1".to_string()));
    }

    #[test]
    fn test_missing_header() {
        let err = parse_basic_auth(None).unwrap_err();
        assert_eq!(err, BasicAuthError::Missing);
        assert_eq!(err.message(), "Authorization header is required");
    }

    #[test]
    fn test_no_colon() {
        let err = parse_basic_auth(Some(&header("alicesecret1"))).unwrap_err();
        assert_eq!(err, BasicAuthError::InvalidFormat);
        assert_eq!(err.message(), "Invalid authorization header format");
    }

    #[test]
    fn test_empty_parts_and_extra_colons() {
        for raw in [":secret1", "alice:", ":", "alice:sec:ret1"] {
            assert_eq!(
                parse_basic_auth(Some(&header(raw))),
                Err(BasicAuthError::InvalidFormat),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_wrong_scheme_or_bad_base64() {
        assert_eq!(
            parse_basic_auth(Some("Bearer abc.def")),
            Err(BasicAuthError::InvalidFormat)
        );
        assert_eq!(
            parse_basic_auth(Some("Basic !!!not-base64!!!")),
            Err(BasicAuthError::InvalidFormat)
        );
    }
}
