//! Segment-aware path prefix matching.

use serde::{Deserialize, Serialize};

/// Trim trailing slashes so `/user/cart/` and `/user/cart` are the same page.
/// The root path and empty input both normalize to `/`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// `prefix` covers `path` when they are equal or `path` continues past the
/// prefix with a new segment. `/user/orders` covers `/user/orders/42` but not
/// `/user/ordersx`.
fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Ordered set of path prefixes, longest first, so the first hit is the
/// longest match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PrefixSet {
    prefixes: Vec<String>,
}

impl PrefixSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| normalize_path(&p.into()).to_string())
            .collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        prefixes.dedup();
        Self { prefixes }
    }

    /// Longest prefix covering `path`, if any.
    pub fn longest_match(&self, path: &str) -> Option<&str> {
        let path = normalize_path(path);
        self.prefixes
            .iter()
            .find(|prefix| covers(prefix, path))
            .map(String::as_str)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.longest_match(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl From<Vec<String>> for PrefixSet {
    fn from(prefixes: Vec<String>) -> Self {
        Self::new(prefixes)
    }
}

impl From<PrefixSet> for Vec<String> {
    fn from(set: PrefixSet) -> Self {
        set.prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/user/cart/"), "/user/cart");
        assert_eq!(normalize_path("/user/cart"), "/user/cart");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_segment_boundaries() {
        let set = PrefixSet::new(["/user/orders", "/user/restaurant"]);
        assert!(set.matches("/user/orders"));
        assert!(set.matches("/user/orders/42"));
        assert!(set.matches("/user/restaurant/abc123"));
        assert!(!set.matches("/user/ordersx"));
        assert!(!set.matches("/user"));
    }

    #[test]
    fn test_longest_match_wins() {
        let set = PrefixSet::new(["/restaurant", "/restaurant/menu", "/restaurant/menu/items"]);
        assert_eq!(
            set.longest_match("/restaurant/menu/items/7"),
            Some("/restaurant/menu/items")
        );
        assert_eq!(set.longest_match("/restaurant/menu/new"), Some("/restaurant/menu"));
        assert_eq!(set.longest_match("/restaurant/setup"), Some("/restaurant"));
        assert_eq!(set.longest_match("/admin"), None);
    }

    #[test]
    fn test_dedup_and_trailing_slash() {
        let set = PrefixSet::new(["/admin/users/", "/admin/users"]);
        assert_eq!(set.len(), 1);
        assert!(set.matches("/admin/users/"));
    }

    #[test]
    fn test_serde_as_list() {
        let set: PrefixSet = serde_json::from_str(r#"["/a", "/a/b"]"#).unwrap();
        assert_eq!(set.longest_match("/a/b/c"), Some("/a/b"));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["/a/b","/a"]"#);
    }
}
