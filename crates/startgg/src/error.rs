use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong here is one of two things: the user's input
/// string was not a recognizable start.gg reference, or the API interaction
/// failed somewhere between the socket and a usable response.
#[derive(Debug, Error)]
pub enum Error {
    /// The input matched none of the recognized link or slug shapes.
    #[error(
        "unrecognized start.gg link or slug: '{input}' \
         (expected a tournament/event URL, 'tournament/<slug>', or 'start.gg/<shorthand>')"
    )]
    InvalidInput { input: String },

    /// The start.gg API could not produce the requested data.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures talking to the start.gg GraphQL endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request to start.gg failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// Non-2xx HTTP response.
    #[error("start.gg returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The response carried GraphQL-level errors instead of data.
    #[error("start.gg rejected the query: {message}")]
    Graphql { message: String },

    /// The body decoded, but not into the shape the query asked for.
    #[error("malformed start.gg response: {detail}")]
    MalformedResponse { detail: String },

    /// The API answered, with a null where the tournament or event should be.
    #[error("nothing found on start.gg for '{slug}'")]
    NotFound { slug: String },
}
