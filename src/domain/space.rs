//! Space identifier resolution.
//!
//! Accepts a full space URL (`https://smallerworld.club/spaces/<ref>`), a URL
//! without scheme, or a bare `<ref>`, where `<ref>` carries a 32 digit hex id
//! optionally split by hyphens and optionally prefixed by a friendly slug.

use thiserror::Error;
use url::Url;

pub const PRODUCTION_HOST: &str = "smallerworld.club";
pub const LOCAL_HOST: &str = "localhost";
pub const LOCAL_BASE: &str = "http://localhost:3000";

const SPACES_SEGMENT: &str = "spaces";
const ID_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpaceInputError {
    #[error("space input is empty")]
    Empty,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("missing host")]
    MissingHost,

    #[error("unexpected host: {0}")]
    UnexpectedHost(String),

    #[error("unrecognized space path: {0}")]
    UnrecognizedPath(String),

    #[error("invalid space id format: {0}")]
    InvalidId(String),
}

/// A resolved space: the endpoint to talk to and the canonical id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceRef {
    pub base: String,
    pub id: String,
}

pub fn default_base(local: bool) -> String {
    if local {
        LOCAL_BASE.to_string()
    } else {
        format!("https://{}", PRODUCTION_HOST)
    }
}

/// Resolve user input into a base endpoint and canonical space id.
///
/// Bare identifiers resolve against `fallback_base`.
pub fn resolve_space_input(raw: &str, fallback_base: &str) -> Result<SpaceRef, SpaceInputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SpaceInputError::Empty);
    }

    if !looks_like_url(raw) {
        return Ok(SpaceRef {
            base: fallback_base.trim_end_matches('/').to_string(),
            id: canonical_space_id(raw)?,
        });
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&with_scheme).map_err(|e| match e {
        url::ParseError::EmptyHost => SpaceInputError::MissingHost,
        other => SpaceInputError::InvalidUrl(other.to_string()),
    })?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(SpaceInputError::MissingHost)?
        .to_ascii_lowercase();
    if host != PRODUCTION_HOST && host != LOCAL_HOST {
        return Err(SpaceInputError::UnexpectedHost(host));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let id_segment = match segments.as_slice() {
        [first, id, ..] if *first == SPACES_SEGMENT => *id,
        _ => return Err(SpaceInputError::UnrecognizedPath(url.path().to_string())),
    };

    Ok(SpaceRef {
        base: url.origin().ascii_serialization(),
        id: canonical_space_id(id_segment)?,
    })
}

/// Canonicalize an identifier segment to the hyphenated 8-4-4-4-12 form.
///
/// Hyphens are dropped and the trailing 32 characters kept, so any friendly
/// slug in front of the id falls away.
pub fn canonical_space_id(input: &str) -> Result<String, SpaceInputError> {
    let compact: Vec<char> = input.trim().chars().filter(|c| *c != '-').collect();
    if compact.len() < ID_LEN {
        return Err(SpaceInputError::InvalidId(input.to_string()));
    }

    let raw: String = compact[compact.len() - ID_LEN..]
        .iter()
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SpaceInputError::InvalidId(input.to_string()));
    }

    Ok(format!(
        "{}-{}-{}-{}-{}",
        &raw[0..8],
        &raw[8..12],
        &raw[12..16],
        &raw[16..20],
        &raw[20..32]
    ))
}

fn looks_like_url(raw: &str) -> bool {
    raw.contains("://") || raw.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "abcdef0123456789abcdef0123456789";
    const CANONICAL: &str = "abcdef01-2345-6789-abcd-ef0123456789";

    fn prod() -> String {
        default_base(false)
    }

    #[test]
    fn test_friendly_slug_canonicalizes() {
        let id = canonical_space_id("cozy-hut-abcdef0123456789abcdef0123456789").unwrap();
        assert_eq!(id, CANONICAL);
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let once = canonical_space_id(HEX).unwrap();
        let twice = canonical_space_id(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equivalent_inputs_agree() {
        let inputs = [
            HEX.to_string(),
            CANONICAL.to_string(),
            format!("cozy-hut-{}", HEX),
            "ABCDEF01-2345-6789-ABCD-EF0123456789".to_string(),
            "abcd-ef01-2345-6789-abcd-ef01-2345-6789".to_string(),
        ];
        for input in inputs {
            assert_eq!(canonical_space_id(&input).unwrap(), CANONICAL, "{}", input);
        }
    }

    #[test]
    fn test_short_id_rejected() {
        assert!(matches!(
            canonical_space_id("abc123"),
            Err(SpaceInputError::InvalidId(_))
        ));
    }

    #[test]
    fn test_non_hex_id_rejected() {
        assert!(matches!(
            canonical_space_id("zzzzzzzz0123456789abcdef01234567"),
            Err(SpaceInputError::InvalidId(_))
        ));
    }

    #[test]
    fn test_resolve_bare_id_uses_fallback_base() {
        let space = resolve_space_input(&format!("  cozy-hut-{}  ", HEX), &prod()).unwrap();
        assert_eq!(space.base, "https://smallerworld.club");
        assert_eq!(space.id, CANONICAL);
    }

    #[test]
    fn test_resolve_production_url() {
        let input = format!("https://smallerworld.club/spaces/cozy-hut-{}", HEX);
        let space = resolve_space_input(&input, LOCAL_BASE).unwrap();
        assert_eq!(space.base, "https://smallerworld.club");
        assert_eq!(space.id, CANONICAL);
    }

    #[test]
    fn test_resolve_url_ignores_trailing_segments() {
        let input = format!("https://SmallerWorld.club/spaces/{}/posts?x=1", HEX);
        let space = resolve_space_input(&input, &prod()).unwrap();
        assert_eq!(space.base, "https://smallerworld.club");
        assert_eq!(space.id, CANONICAL);
    }

    #[test]
    fn test_resolve_local_url_keeps_port() {
        let input = format!("http://localhost:3000/spaces/{}", HEX);
        let space = resolve_space_input(&input, &prod()).unwrap();
        assert_eq!(space.base, "http://localhost:3000");
    }

    #[test]
    fn test_resolve_url_without_scheme_defaults_to_https() {
        let input = format!("smallerworld.club/spaces/{}", HEX);
        let space = resolve_space_input(&input, LOCAL_BASE).unwrap();
        assert_eq!(space.base, "https://smallerworld.club");
    }

    #[test]
    fn test_resolve_errors() {
        assert_eq!(
            resolve_space_input("   ", &prod()),
            Err(SpaceInputError::Empty)
        );
        assert_eq!(
            resolve_space_input(&format!("https://example.com/spaces/{}", HEX), &prod()),
            Err(SpaceInputError::UnexpectedHost("example.com".to_string()))
        );
        assert!(matches!(
            resolve_space_input(&format!("https://smallerworld.club/worlds/{}", HEX), &prod()),
            Err(SpaceInputError::UnrecognizedPath(_))
        ));
        assert!(matches!(
            resolve_space_input("https://smallerworld.club/spaces", &prod()),
            Err(SpaceInputError::UnrecognizedPath(_))
        ));
        assert_eq!(
            resolve_space_input("https://", &prod()),
            Err(SpaceInputError::MissingHost)
        );
        assert!(matches!(
            resolve_space_input("https://smallerworld.club/spaces/short", &prod()),
            Err(SpaceInputError::InvalidId(_))
        ));
    }
}
