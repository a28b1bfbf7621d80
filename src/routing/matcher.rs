//! Path pattern matching module
//!
//! Implements segment-based matching for route patterns. A pattern is a
//! sequence of literal segments and `:name` capture segments, e.g.
//! `/factorial/:n` matches `/factorial/6` with `n = "6"`.

/// A parsed route pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path parameters captured during a successful match
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Pattern {
    /// Parse a pattern string like `/sort/:count/:length`
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix(':').map_or_else(
                    || Segment::Literal(s.to_string()),
                    |name| Segment::Param(name.to_string()),
                )
            })
            .collect();
        Self { segments }
    }

    /// Match a request path against this pattern.
    ///
    /// Returns the captured parameters on success, `None` on mismatch.
    /// Segment counts must agree exactly; there is no prefix matching.
    /// Duplicate slashes never match; a single trailing slash is
    /// tolerated.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        if path.contains("//") {
            return None;
        }
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.push((name.clone(), (*part).to_string()));
                }
            }
        }
        Some(Params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_pattern_matches_only_root() {
        let pattern = Pattern::parse("/");
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/ping").is_none());
    }

    #[test]
    fn literal_pattern_requires_exact_segments() {
        let pattern = Pattern::parse("/ping");
        assert!(pattern.match_path("/ping").is_some());
        assert!(pattern.match_path("/ping/extra").is_none());
        assert!(pattern.match_path("/pong").is_none());
        assert!(pattern.match_path("/").is_none());
    }

    #[test]
    fn param_segment_captures_value() {
        let pattern = Pattern::parse("/factorial/:n");
        let params = pattern.match_path("/factorial/6").unwrap();
        assert_eq!(params.get("n"), Some("6"));
        assert!(pattern.match_path("/factorial").is_none());
        assert!(pattern.match_path("/factorial/6/7").is_none());
    }

    #[test]
    fn multiple_params_capture_in_order() {
        let pattern = Pattern::parse("/sort/:count/:length");
        let params = pattern.match_path("/sort/5/8").unwrap();
        assert_eq!(params.get("count"), Some("5"));
        assert_eq!(params.get("length"), Some("8"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn param_captures_arbitrary_text() {
        // Parameter validation happens in the handlers, not the matcher
        let pattern = Pattern::parse("/factorial/:n");
        let params = pattern.match_path("/factorial/banana").unwrap();
        assert_eq!(params.get("n"), Some("banana"));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let pattern = Pattern::parse("/ping");
        assert!(pattern.match_path("/ping/").is_some());
    }

    #[test]
    fn duplicate_slashes_do_not_match() {
        let pattern = Pattern::parse("/ping");
        assert!(pattern.match_path("//ping").is_none());
        assert!(pattern.match_path("/ping//").is_none());
        assert!(pattern.match_path("/ping////").is_none());

        let root = Pattern::parse("/");
        assert!(root.match_path("//").is_none());
        assert!(root.match_path("/").is_some());
    }
}
