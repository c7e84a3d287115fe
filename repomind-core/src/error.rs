/// Errors produced by the simulation core.
///
/// The simulated pipeline itself never fails; only navigation input coming
/// from outside (the command line, a typed location) can be malformed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The location string could not be parsed as a relative URL.
    #[error("invalid location {location:?}: {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },
    /// The location parsed but names no known screen.
    #[error("unknown route {0:?}")]
    UnknownRoute(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
