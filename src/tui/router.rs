//! Path router.
//!
//! A `Router` is built from the current path on every render pass and
//! thrown away afterwards. Patterns are tried in call order:
//!
//! ```rust,ignore
//! let mut router = Router::new(path, "");
//! router.unique_match("playgrounds/:id", |route| Page::Playground(route.param("id")));
//! router.unique_match("playgrounds", |_| Page::List);
//! router.miss(|| Page::Playground(None));
//! ```
//!
//! A pattern matches a *prefix* of the path, segment by segment. Literal
//! segments must be equal; `:name` captures one non-empty segment. The
//! matched prefix must end at a `/` or the end of the path, so `widget`
//! never matches `/widgets`. Whatever is left over is handed to the match
//! as `remaining_path`, for a child router to continue with.

/// A successful match, as seen by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Full path matched so far, including the router's base path.
    pub path: String,
    params: Vec<(String, String)>,
}

impl Route {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Captured values in pattern order.
    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, value)| value.as_str())
    }
}

/// What a router records for each match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed<T> {
    pub content: T,
    /// Unmatched rest of the path, without a leading slash.
    pub remaining_path: String,
    /// Path consumed up to and including this match.
    pub base_path: String,
}

impl<T> Routed<T> {
    /// A router over the unmatched remainder, for nested routes.
    pub fn child_router<U>(&self) -> Router<U> {
        Router::new(self.remaining_path.clone(), self.base_path.clone())
    }
}

pub struct Router<T> {
    path: String,
    base_path: String,
    matches: Vec<Routed<T>>,
}

impl<T> Router<T> {
    pub fn new(path: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base_path: base_path.into(),
            matches: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Tries `pattern` regardless of earlier matches. Returns whether it
    /// matched.
    pub fn match_pattern(&mut self, pattern: &str, handler: impl FnOnce(&Route) -> T) -> bool {
        let Some(found) = check(&self.path, pattern) else {
            return false;
        };

        let route = Route {
            path: join_paths(&self.base_path, &found.matched),
            params: found.params,
        };
        let content = handler(&route);
        self.matches.push(Routed {
            content,
            remaining_path: found.remaining,
            base_path: route.path,
        });
        true
    }

    /// Like `match_pattern`, but skipped once anything has matched.
    pub fn unique_match(&mut self, pattern: &str, handler: impl FnOnce(&Route) -> T) -> bool {
        if !self.matches.is_empty() {
            return false;
        }
        self.match_pattern(pattern, handler)
    }

    /// Fallback, only invoked if nothing has matched so far.
    pub fn miss(&mut self, handler: impl FnOnce() -> T) -> bool {
        if !self.matches.is_empty() {
            return false;
        }
        let content = handler();
        self.push_whole(content);
        true
    }

    /// Matches only an empty path (or a lone `/`).
    pub fn root(&mut self, handler: impl FnOnce() -> T) -> bool {
        if !self.path.is_empty() && self.path != "/" {
            return false;
        }
        let content = handler();
        self.push_whole(content);
        true
    }

    fn push_whole(&mut self, content: T) {
        self.matches.push(Routed {
            content,
            remaining_path: String::new(),
            base_path: self.base_path.clone(),
        });
    }

    pub fn matches(&self) -> &[Routed<T>] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Routed<T>> {
        self.matches
    }

    /// The winning match, if any.
    pub fn into_first(self) -> Option<Routed<T>> {
        self.matches.into_iter().next()
    }
}

struct Found {
    matched: String,
    remaining: String,
    params: Vec<(String, String)>,
}

/// Segment-wise prefix match of `pattern` against `path`.
fn check(path: &str, pattern: &str) -> Option<Found> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let pattern = pattern.trim_matches('/');
    if pattern.is_empty() {
        return None;
    }

    let mut rest = path;
    let mut params = Vec::new();
    let mut matched = Vec::new();

    for expected in pattern.split('/') {
        let (segment, after) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };

        if let Some(name) = expected.strip_prefix(':') {
            if segment.is_empty() {
                return None;
            }
            params.push((name.to_string(), segment.to_string()));
        } else if segment != expected {
            return None;
        }

        matched.push(segment);
        // A segment that ran to the end of the path leaves nothing for the
        // pattern's remaining segments.
        if !rest.contains('/') {
            rest = "";
            if matched.len() < pattern.split('/').count() {
                return None;
            }
            break;
        }
        rest = after;
    }

    Some(Found {
        matched: matched.join("/"),
        remaining: rest.to_string(),
        params,
    })
}

fn join_paths(base: &str, matched: &str) -> String {
    let base = base.trim_end_matches('/');
    if matched.is_empty() {
        if base.is_empty() { "/".to_string() } else { base.to_string() }
    } else {
        format!("{}/{}", base, matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Page {
        Playground(Option<String>),
        List,
    }

    fn route_app(path: &str) -> Option<Routed<Page>> {
        let mut router = Router::new(path, "");
        router.unique_match("playgrounds/:id", |route| {
            Page::Playground(route.param("id").map(str::to_string))
        });
        router.unique_match("playgrounds", |_| Page::List);
        router.miss(|| Page::Playground(None));
        router.into_first()
    }

    #[test]
    fn test_capture_segment() {
        let mut router = Router::new("/playgrounds/42", "");
        assert!(router.match_pattern("playgrounds/:id", |route| {
            route.param("id").map(str::to_string)
        }));
        let routed = &router.matches()[0];
        assert_eq!(routed.content.as_deref(), Some("42"));
        assert_eq!(routed.base_path, "/playgrounds/42");
        assert_eq!(routed.remaining_path, "");
    }

    #[test]
    fn test_literal_needs_segment_boundary() {
        let mut router = Router::new("/playgroundsx/42", "");
        assert!(!router.match_pattern("playgrounds/:id", |_| ()));

        let mut router = Router::new("/widgets", "");
        assert!(!router.match_pattern("widget", |_| ()));
    }

    #[test]
    fn test_prefix_match_keeps_remainder() {
        let mut router = Router::new("/playgrounds/42/preview/full", "");
        router.match_pattern("playgrounds/:id", |_| ());
        let routed = &router.matches()[0];
        assert_eq!(routed.remaining_path, "preview/full");
        assert_eq!(routed.base_path, "/playgrounds/42");
    }

    #[test]
    fn test_trailing_slash_is_a_boundary() {
        let mut router = Router::new("/playgrounds/", "");
        assert!(router.match_pattern("playgrounds", |_| ()));
        assert_eq!(router.matches()[0].remaining_path, "");
    }

    #[test]
    fn test_path_without_leading_slash() {
        let mut router = Router::new("playgrounds/9", "");
        assert!(router.match_pattern("playgrounds/:id", |route| {
            route.captures().map(str::to_string).collect::<Vec<_>>()
        }));
        assert_eq!(router.matches()[0].content, vec!["9".to_string()]);
    }

    #[test]
    fn test_capture_rejects_missing_segment() {
        let mut router = Router::new("/playgrounds", "");
        assert!(!router.match_pattern("playgrounds/:id", |_| ()));
        let mut router = Router::new("/playgrounds//x", "");
        assert!(!router.match_pattern("playgrounds/:id", |_| ()));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            route_app("/playgrounds/42").unwrap().content,
            Page::Playground(Some("42".to_string()))
        );
        assert_eq!(route_app("/playgrounds").unwrap().content, Page::List);
        assert_eq!(route_app("/").unwrap().content, Page::Playground(None));
        assert_eq!(route_app("/nowhere").unwrap().content, Page::Playground(None));
    }

    #[test]
    fn test_unique_match_skips_after_a_match() {
        let mut router = Router::new("/playgrounds/42", "");
        router.unique_match("playgrounds/:id", |_| "specific");
        let matched_again = router.unique_match("playgrounds", |_| "general");
        assert!(!matched_again);
        assert_eq!(router.matches().len(), 1);
        assert_eq!(router.matches()[0].content, "specific");
    }

    #[test]
    fn test_plain_match_does_not_skip() {
        let mut router = Router::new("/playgrounds/42", "");
        router.match_pattern("playgrounds/:id", |_| 1);
        router.match_pattern("playgrounds", |_| 2);
        let contents: Vec<i32> = router.into_matches().into_iter().map(|r| r.content).collect();
        assert_eq!(contents, vec![1, 2]);
    }

    #[test]
    fn test_miss_only_when_nothing_matched() {
        let mut router = Router::new("/playgrounds", "");
        router.unique_match("playgrounds", |_| "list");
        assert!(!router.miss(|| "fallback"));

        let mut router: Router<&str> = Router::new("/elsewhere", "");
        assert!(router.miss(|| "fallback"));
        assert_eq!(router.matches()[0].remaining_path, "");
    }

    #[test]
    fn test_root() {
        let mut router = Router::new("/", "");
        assert!(router.root(|| "home"));
        let mut router = Router::new("", "/playgrounds/1");
        assert!(router.root(|| "home"));
        let mut router = Router::new("/playgrounds", "");
        assert!(!router.root(|| "home"));
    }

    #[test]
    fn test_child_router_continues_from_remainder() {
        let mut router = Router::new("/playgrounds/42/preview", "");
        router.unique_match("playgrounds/:id", |_| ());
        let routed = router.into_first().unwrap();

        let mut child = routed.child_router();
        assert_eq!(child.path(), "preview");
        assert!(child.unique_match("preview", |route| route.path.clone()));
        assert_eq!(child.matches()[0].content, "/playgrounds/42/preview");
    }
}
