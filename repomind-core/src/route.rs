//! Screen routing.
//!
//! The three screens are linear: landing, processing, chat. The only state
//! carried between them is the repository identifier, passed as the `repo`
//! query parameter of a location string such as
//! `/processing?repo=octocat%2FHello-World`.

use url::form_urlencoded;
use url::Url;

use crate::error::{Error, Result};

/// Identifier used by the chat screen when none was passed.
pub const PLACEHOLDER_REPO: &str = "example/repository";

/// Base every location is resolved against.
const BASE: &str = "http://repomind.local/";

/// One screen plus its navigation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Processing { repo: String },
    Chat { repo: String },
}

impl Route {
    /// Parses a location and applies the per-screen fallbacks.
    ///
    /// A processing location without a `repo` redirects to [`Route::Landing`];
    /// a chat location without one gets [`PLACEHOLDER_REPO`]. An empty `repo`
    /// value counts as absent.
    pub fn parse(location: &str) -> Result<Route> {
        let url = Url::parse(BASE)
            .and_then(|base| base.join(location))
            .map_err(|source| Error::InvalidLocation {
                location: location.to_owned(),
                source,
            })?;

        let repo = url
            .query_pairs()
            .find(|(key, _)| key == "repo")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        match url.path().trim_end_matches('/') {
            "" => Ok(Route::Landing),
            "/processing" => match repo {
                Some(repo) => Ok(Route::Processing { repo }),
                None => {
                    tracing::debug!(location, "processing without repo, redirecting to landing");
                    Ok(Route::Landing)
                }
            },
            "/chat" => Ok(Route::Chat {
                repo: repo.unwrap_or_else(|| PLACEHOLDER_REPO.to_owned()),
            }),
            other => Err(Error::UnknownRoute(other.to_owned())),
        }
    }

    /// Renders the route back into a location string.
    pub fn to_location(&self) -> String {
        match self {
            Route::Landing => "/".to_owned(),
            Route::Processing { repo } => format!("/processing?{}", repo_query(repo)),
            Route::Chat { repo } => format!("/chat?{}", repo_query(repo)),
        }
    }

    /// The repository identifier, if this screen carries one.
    pub fn repo(&self) -> Option<&str> {
        match self {
            Route::Landing => None,
            Route::Processing { repo } | Route::Chat { repo } => Some(repo),
        }
    }
}

fn repo_query(repo: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("repo", repo)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashes_are_encoded() {
        let route = Route::Processing {
            repo: "octocat/Hello-World".into(),
        };
        assert_eq!(route.to_location(), "/processing?repo=octocat%2FHello-World");
    }

    #[test]
    fn locations_parse_back() {
        let route = Route::parse("/chat?repo=octocat%2FHello-World").unwrap();
        assert_eq!(
            route,
            Route::Chat {
                repo: "octocat/Hello-World".into()
            }
        );
        assert_eq!(Route::parse("/").unwrap(), Route::Landing);
        assert_eq!(Route::parse("").unwrap(), Route::Landing);
    }

    #[test]
    fn urls_with_spaces_and_symbols_survive() {
        let repo = "https://github.com/a b/c?x=1&y=2";
        let route = Route::Chat { repo: repo.into() };
        assert_eq!(Route::parse(&route.to_location()).unwrap().repo(), Some(repo));
    }

    #[test]
    fn processing_without_repo_redirects() {
        assert_eq!(Route::parse("/processing").unwrap(), Route::Landing);
        assert_eq!(Route::parse("/processing?repo=").unwrap(), Route::Landing);
    }

    #[test]
    fn chat_without_repo_uses_placeholder() {
        assert_eq!(
            Route::parse("/chat").unwrap().repo(),
            Some(PLACEHOLDER_REPO)
        );
    }

    #[test]
    fn unknown_paths_are_errors() {
        let err = Route::parse("/settings").unwrap_err();
        assert!(matches!(err, Error::UnknownRoute(ref p) if p == "/settings"));
    }
}
