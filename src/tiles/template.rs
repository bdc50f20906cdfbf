//! Tile URL templates (`http://{s}.example.com/{z}/{x}/{y}.png`).
//!
//! A template is tokenized once when it is parsed, so expanding it for each
//! requested tile is a single pass over the segments.

use serde::{Deserialize, Serialize};

use crate::{core::geo::TileCoord, layers::tile::Subdomains, MapError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Zoom,
    X,
    Y,
    Subdomain,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "z" => Some(Self::Zoom),
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "s" => Some(Self::Subdomain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Placeholder),
}

/// A parsed tile URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parses a template, requiring `{z}`, `{x}` and `{y}`.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| MapError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unclosed '{'"))?;
            let name = &after[..close];
            let token = Placeholder::from_name(name)
                .ok_or_else(|| invalid(&format!("unknown placeholder '{{{}}}'", name)))?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(token));
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if literal.contains('}') {
            return Err(invalid("unmatched '}'"));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let has = |p: Placeholder| segments.contains(&Segment::Token(p));
        for (placeholder, name) in [
            (Placeholder::Zoom, "{z}"),
            (Placeholder::X, "{x}"),
            (Placeholder::Y, "{y}"),
        ] {
            if !has(placeholder) {
                return Err(invalid(&format!("missing {}", name)));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the template shards requests with `{s}`.
    pub fn uses_subdomains(&self) -> bool {
        self.segments
            .contains(&Segment::Token(Placeholder::Subdomain))
    }

    /// Builds the request URL for `coord`.
    ///
    /// `{s}` is replaced by `subdomains[(x + y) % len]`. Without a subdomain
    /// set it stays in the URL untouched. Leaflet instead falls back to its
    /// own `"abc"` shards, so the browser and in-process consumers request
    /// different hosts for such a layer.
    pub fn expand(&self, coord: TileCoord, subdomains: Option<&Subdomains>) -> String {
        let shard = subdomains.and_then(|s| s.pick(coord));
        let mut url = String::with_capacity(self.raw.len() + 16);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Token(Placeholder::Zoom) => url.push_str(&coord.z.to_string()),
                Segment::Token(Placeholder::X) => url.push_str(&coord.x.to_string()),
                Segment::Token(Placeholder::Y) => url.push_str(&coord.y.to_string()),
                Segment::Token(Placeholder::Subdomain) => match shard {
                    Some(sub) => url.push_str(sub),
                    None => url.push_str("{s}"),
                },
            }
        }
        url
    }
}

impl std::str::FromStr for UrlTemplate {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UrlTemplate {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<UrlTemplate> for String {
    fn from(template: UrlTemplate) -> Self {
        template.raw
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARTO: &str = "http://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png";

    #[test]
    fn test_expand_plain_template() {
        let template = UrlTemplate::parse("http://localhost:5000/{z}/{x}/{y}.png").unwrap();
        assert!(!template.uses_subdomains());
        assert_eq!(
            template.expand(TileCoord::new(9221, 12892, 15), None),
            "http://localhost:5000/15/9221/12892.png"
        );
    }

    #[test]
    fn test_expand_with_subdomains() {
        let template = UrlTemplate::parse(CARTO).unwrap();
        let subdomains = Subdomains::from_letters("abcd");

        // (x + y) % 4 picks the shard
        assert_eq!(
            template.expand(TileCoord::new(1, 2, 3), Some(&subdomains)),
            "http://d.basemaps.cartocdn.com/dark_all/3/1/2.png"
        );
        assert_eq!(
            template.expand(TileCoord::new(2, 2, 3), Some(&subdomains)),
            "http://a.basemaps.cartocdn.com/dark_all/3/2/2.png"
        );
    }

    #[test]
    fn test_subdomain_token_left_literal_without_set() {
        let template = UrlTemplate::parse(CARTO).unwrap();
        assert_eq!(
            template.expand(TileCoord::new(0, 0, 0), None),
            "http://{s}.basemaps.cartocdn.com/dark_all/0/0/0.png"
        );
        assert_eq!(
            template.expand(TileCoord::new(0, 0, 0), Some(&Subdomains::default())),
            "http://{s}.basemaps.cartocdn.com/dark_all/0/0/0.png"
        );
    }

    #[test]
    fn test_repeated_tokens() {
        let template = UrlTemplate::parse("/{z}/{x}/{y}?zoom={z}").unwrap();
        assert_eq!(template.expand(TileCoord::new(1, 0, 1), None), "/1/1/0?zoom=1");
    }

    #[test]
    fn test_rejects_invalid_templates() {
        for bad in [
            "http://example.com/{z}/{x}.png",
            "http://example.com/{z}/{x}/{y",
            "http://example.com/{z}/{x}/{y}/{r}.png",
            "http://example.com/{z}/{x}/{y}}.png",
            "",
        ] {
            assert!(
                matches!(UrlTemplate::parse(bad), Err(MapError::InvalidTemplate { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        let template: UrlTemplate = serde_json::from_str(&format!("\"{}\"", CARTO)).unwrap();
        assert_eq!(template.as_str(), CARTO);
        assert_eq!(serde_json::to_string(&template).unwrap(), format!("\"{}\"", CARTO));
        assert!(serde_json::from_str::<UrlTemplate>("\"/tiles/{z}.png\"").is_err());
    }
}
