//! Client library for the start.gg tournament API.
//!
//! Three pieces, matching the pipeline the CLI runs: [`resolve`] turns a
//! user-supplied URL or slug into a [`TournamentRef`], [`client`] fetches the
//! referenced placements over GraphQL, and [`format`] renders them as text.

pub mod client;
pub mod error;
pub mod format;
pub mod resolve;

pub use client::{
    Client, DEFAULT_ENDPOINT, Event, EventResults, Placement, Tournament, TournamentResults,
};
pub use error::{ApiError, Error, Result};
pub use resolve::TournamentRef;
