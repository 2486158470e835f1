//! Client-visible routes
//!
//! `/` is the upload screen, `/analyze/{file_id}` the two-pane analysis
//! screen. Parsing is total; anything else is unrecognized and the caller
//! falls back to a placeholder.

/// A recognized client route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Analyze { file_id: String },
}

impl Route {
    /// Parse a location pathname. Returns `None` for unrecognized paths,
    /// including `/analyze/` with a missing id.
    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "" | "/" => Some(Route::Upload),
            _ => {
                let rest = path.strip_prefix("/analyze/")?;
                let rest = rest.strip_suffix('/').unwrap_or(rest);
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some(Route::Analyze {
                    file_id: rest.to_string(),
                })
            }
        }
    }

    /// Pathname for this route, used when pushing history entries.
    pub fn path(&self) -> String {
        match self {
            Route::Upload => "/".to_string(),
            Route::Analyze { file_id } => format!("/analyze/{}", file_id),
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            Route::Upload => None,
            Route::Analyze { file_id } => Some(file_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_is_the_upload_screen() {
        assert_eq!(Route::parse("/"), Some(Route::Upload));
        assert_eq!(Route::parse(""), Some(Route::Upload));
    }

    #[test]
    fn analyze_path_carries_the_file_id() {
        assert_eq!(
            Route::parse("/analyze/abc123"),
            Some(Route::Analyze {
                file_id: "abc123".to_string()
            })
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(
            Route::parse("/analyze/abc123/"),
            Some(Route::Analyze {
                file_id: "abc123".to_string()
            })
        );
    }

    #[test]
    fn analyze_without_an_id_is_unrecognized() {
        assert_eq!(Route::parse("/analyze/"), None);
        assert_eq!(Route::parse("/analyze"), None);
    }

    #[test]
    fn extra_segments_are_unrecognized() {
        assert_eq!(Route::parse("/analyze/abc/def"), None);
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn upload_response_maps_to_the_analysis_path() {
        let route = Route::Analyze {
            file_id: "abc123".to_string(),
        };
        assert_eq!(route.path(), "/analyze/abc123");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// path() and parse() round-trip for slash-free ids.
            #[test]
            fn path_parse_round_trip(file_id in "[A-Za-z0-9_-]{1,32}") {
                let route = Route::Analyze { file_id };
                prop_assert_eq!(Route::parse(&route.path()), Some(route));
            }
        }
    }
}
