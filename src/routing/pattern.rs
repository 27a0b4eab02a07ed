//! Route pattern syntax.
//!
//! Patterns are written as `/api/users/:id` with named segments prefixed by
//! `:` and an optional trailing wildcard `*` (or `*name`). The axum binder
//! translates them into axum's `{id}` / `{*path}` form.
//!
//! A trailing wildcard captures one or more characters: `/public/*` matches
//! `/public/app.js` but neither `/public/` nor `/public`. Register those
//! paths separately when they should be served too.
//!
//! Literal `{` and `}` in static segments are escaped as `{{` and `}}` so
//! axum matches them verbatim instead of reading a capture.

/// Name given to an anonymous trailing wildcard.
pub const WILDCARD_PARAM: &str = "path";

/// Translate a route pattern into axum path syntax.
///
/// An empty pattern becomes `/`, which is what a root group registering
/// `""` means.
pub fn to_axum_path(pattern: &str) -> String {
    if pattern.is_empty() {
        return "/".to_string();
    }

    pattern
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                format!("{{{}}}", name)
            } else if let Some(name) = segment.strip_prefix('*') {
                let name = if name.is_empty() { WILDCARD_PARAM } else { name };
                format!("{{*{}}}", name)
            } else {
                segment.replace('{', "{{").replace('}', "}}")
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Names of the parameters a pattern captures, in order.
pub fn params(pattern: &str) -> Vec<String> {
    pattern
        .split('/')
        .filter_map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                Some(name.to_string())
            } else {
                segment.strip_prefix('*').map(|name| {
                    if name.is_empty() {
                        WILDCARD_PARAM.to_string()
                    } else {
                        name.to_string()
                    }
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pattern_unchanged() {
        assert_eq!(to_axum_path("/api/health"), "/api/health");
        assert_eq!(to_axum_path("/"), "/");
    }

    #[test]
    fn test_empty_pattern_is_root() {
        assert_eq!(to_axum_path(""), "/");
    }

    #[test]
    fn test_named_segments() {
        assert_eq!(
            to_axum_path("/api/orgs/:orgId/users/:userId"),
            "/api/orgs/{orgId}/users/{userId}"
        );
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(
            to_axum_path("/api/plugins/:pluginId/resources/*"),
            "/api/plugins/{pluginId}/resources/{*path}"
        );
        assert_eq!(to_axum_path("/public/*file"), "/public/{*file}");
    }

    #[test]
    fn test_literal_braces_escaped() {
        assert_eq!(to_axum_path("/api/{legacy}"), "/api/{{legacy}}");
        assert_eq!(to_axum_path("/api/{raw}/:id"), "/api/{{raw}}/{id}");
    }

    #[test]
    fn test_params() {
        assert_eq!(params("/api/orgs/:orgId/users/:userId"), vec!["orgId", "userId"]);
        assert_eq!(params("/public/*"), vec!["path"]);
        assert!(params("/api/health").is_empty());
    }
}
