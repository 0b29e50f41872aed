use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};
use crate::resolve::TournamentRef;

/// Public start.gg GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.start.gg/gql/alpha";

/// Standings page size. start.gg caps queries by requested object count; a
/// page of this size with our two-field selection stays well under the cap.
const STANDINGS_PER_PAGE: u32 = 100;

const EVENT_QUERY: &str = r"
query Event($slug: String) {
  event(slug: $slug) {
    id
    name
    tournament { name }
    videogame { name }
  }
}";

const TOURNAMENT_QUERY: &str = r"
query TournamentEvents($slug: String) {
  tournament(slug: $slug) {
    name
    events {
      id
      name
      videogame { name }
    }
  }
}";

const STANDINGS_QUERY: &str = r"
query Standings($eventId: ID!, $page: Int!, $perPage: Int!) {
  event(id: $eventId) {
    standings(query: { page: $page, perPage: $perPage }) {
      pageInfo { total totalPages }
      nodes {
        placement
        entrant { name }
      }
    }
  }
}";

/// One competitor's final placement in an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// 1-based final rank. Ties share a rank, so values need not be
    /// contiguous.
    pub rank: u32,
    /// Entrant display name as start.gg renders it, team prefix included.
    pub entrant: String,
}

/// An event, with enough context to label its results.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub game: String,
    pub tournament: String,
}

/// A tournament and the events visible on it.
#[derive(Debug, Clone)]
pub struct Tournament {
    pub name: String,
    pub events: Vec<Event>,
}

/// Complete standings for one event.
#[derive(Debug, Clone)]
pub struct EventResults {
    pub event: Event,
    pub placements: Vec<Placement>,
}

/// Results for everything a [`TournamentRef`] points at: one event, or every
/// event on the tournament.
#[derive(Debug, Clone)]
pub struct TournamentResults {
    pub tournament: String,
    pub events: Vec<EventResults>,
}

/// start.gg GraphQL client, scoped to the queries this tool needs.
///
/// Each method issues one logical lookup; nothing is cached and nothing runs
/// concurrently. Requests carry the API token as a bearer header.
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl Client {
    /// Client against the public start.gg endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, token)
    }

    /// Client against a non-default GraphQL endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Look up an event by its full `tournament/<t>/event/<e>` slug.
    pub async fn event(&self, event_slug: &str) -> Result<Event> {
        info!(slug = %event_slug, "looking up event");

        let data: EventData = self.post(EVENT_QUERY, json!({ "slug": event_slug })).await?;
        let node = data.event.ok_or_else(|| ApiError::NotFound {
            slug: event_slug.to_string(),
        })?;

        Ok(Event {
            id: node.id,
            name: node.name,
            game: node.videogame.name,
            tournament: node.tournament.name,
        })
    }

    /// Look up a tournament and the events on it. Accepts full slugs
    /// (`evo-2023`) and shorthands (`evo`) alike; the API resolves both.
    pub async fn tournament(&self, slug: &str) -> Result<Tournament> {
        info!(slug = %slug, "looking up tournament");

        let data: TournamentData = self.post(TOURNAMENT_QUERY, json!({ "slug": slug })).await?;
        let node = data.tournament.ok_or_else(|| ApiError::NotFound {
            slug: slug.to_string(),
        })?;

        let TournamentNode { name, events } = node;
        let events = events
            .unwrap_or_default()
            .into_iter()
            .map(|e| Event {
                id: e.id,
                name: e.name,
                game: e.videogame.name,
                tournament: name.clone(),
            })
            .collect();

        Ok(Tournament { name, events })
    }

    /// Fetch the complete standings of an event, paging until exhausted.
    ///
    /// Returns placements sorted by rank ascending; ties keep the order the
    /// API listed them in.
    pub async fn standings(&self, event_id: i64) -> Result<Vec<Placement>> {
        let mut placements = Vec::new();
        let mut reported_total;
        let mut page = 1u32;

        loop {
            let data: StandingsData = self
                .post(
                    STANDINGS_QUERY,
                    json!({
                        "eventId": event_id,
                        "page": page,
                        "perPage": STANDINGS_PER_PAGE,
                    }),
                )
                .await?;

            let event = data.event.ok_or_else(|| ApiError::NotFound {
                slug: format!("event {event_id}"),
            })?;
            let standings = event.standings.ok_or_else(|| ApiError::MalformedResponse {
                detail: format!("no standings in response for event {event_id}"),
            })?;

            let nodes = standings.nodes.unwrap_or_default();
            debug!(event = event_id, page, fetched = nodes.len(), "standings page");

            placements.extend(nodes.into_iter().map(|node| Placement {
                rank: node.placement,
                entrant: node.entrant.name,
            }));
            reported_total = standings.page_info.total;

            if page >= standings.page_info.total_pages {
                break;
            }
            page += 1;
        }

        if placements.len() as u32 != reported_total {
            warn!(
                event = event_id,
                collected = placements.len(),
                reported = reported_total,
                "standings count differs from the total the API reported"
            );
        }

        // Pages arrive rank-ascending already; the sort makes it a guarantee.
        placements.sort_by_key(|p| p.rank);

        info!(event = event_id, entrants = placements.len(), "collected standings");
        Ok(placements)
    }

    /// Fetch results for everything `reference` points at.
    ///
    /// An event-qualified reference yields that one event's standings; a bare
    /// tournament reference yields standings for every event on it, fetched
    /// one at a time in listed order. All fetching completes before this
    /// returns, so callers never observe partial results.
    pub async fn results(&self, reference: &TournamentRef) -> Result<TournamentResults> {
        match &reference.event_slug {
            Some(event_slug) => {
                let event = self.event(event_slug).await?;
                let placements = self.standings(event.id).await?;
                Ok(TournamentResults {
                    tournament: event.tournament.clone(),
                    events: vec![EventResults { event, placements }],
                })
            }
            None => {
                let tournament = self.tournament(&reference.slug).await?;
                let mut events = Vec::with_capacity(tournament.events.len());
                for event in tournament.events {
                    let placements = self.standings(event.id).await?;
                    events.push(EventResults { event, placements });
                }
                Ok(TournamentResults {
                    tournament: tournament.name,
                    events,
                })
            }
        }
    }

    /// POST one GraphQL query and peel the response envelope.
    async fn post<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> std::result::Result<T, ApiError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }

        let body: GqlResponse<T> =
            response
                .json()
                .await
                .map_err(|e| ApiError::MalformedResponse {
                    detail: e.to_string(),
                })?;

        if let Some(err) = body.errors.first() {
            return Err(ApiError::Graphql {
                message: err.message.clone(),
            });
        }

        body.data.ok_or_else(|| ApiError::MalformedResponse {
            detail: "response carried neither data nor errors".into(),
        })
    }
}

/// GraphQL response envelope: `data` and/or an `errors` array.
#[derive(Debug, Deserialize)]
struct GqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Debug, Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EventData {
    event: Option<EventNode>,
}

#[derive(Debug, Deserialize)]
struct EventNode {
    id: i64,
    name: String,
    tournament: Named,
    videogame: Named,
}

#[derive(Debug, Deserialize)]
struct TournamentData {
    tournament: Option<TournamentNode>,
}

#[derive(Debug, Deserialize)]
struct TournamentNode {
    name: String,
    events: Option<Vec<EventListNode>>,
}

#[derive(Debug, Deserialize)]
struct EventListNode {
    id: i64,
    name: String,
    videogame: Named,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    event: Option<StandingsEvent>,
}

#[derive(Debug, Deserialize)]
struct StandingsEvent {
    standings: Option<StandingsPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingsPage {
    page_info: PageInfo,
    nodes: Option<Vec<StandingNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total: u32,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct StandingNode {
    placement: u32,
    entrant: EntrantNode,
}

#[derive(Debug, Deserialize)]
struct EntrantNode {
    name: String,
}
