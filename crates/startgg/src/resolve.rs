use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Path words that can never be a shorthand slug. A capture of one of these
/// means the input was a truncated tournament/event URL, not a reference.
const RESERVED_SEGMENTS: &[&str] = &["tournament", "event"];

static EVENT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btournament/([A-Za-z0-9-]+)/event/([A-Za-z0-9-]+)").unwrap()
});

static TOURNAMENT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btournament/([A-Za-z0-9-]+)").unwrap());

static SHORTHAND_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstart\.gg/([A-Za-z0-9-]+)").unwrap());

/// A parsed reference to a start.gg tournament, optionally narrowed to a
/// single event on it.
///
/// Built once from the user's input and immutable from then on. `slug` is
/// what the tournament query accepts: either the full slug (`evo-2023`) or a
/// shorthand (`evo`). `event_slug` carries the whole `tournament/<t>/event/<e>`
/// path, which is the form the event query expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentRef {
    pub slug: String,
    pub event_slug: Option<String>,
}

impl FromStr for TournamentRef {
    type Err = Error;

    /// Recognizes event links (`tournament/<t>/event/<e>`), tournament
    /// links (`tournament/<t>`), and shorthands (`start.gg/<short>`), with
    /// or without scheme, `www.`, or trailing path. Narrower shapes win.
    /// Bare tokens (`evo`) are rejected; shorthands require the `start.gg/`
    /// prefix.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if let Some(caps) = EVENT_LINK.captures(trimmed) {
            let tournament = &caps[1];
            return Ok(TournamentRef {
                slug: tournament.to_string(),
                event_slug: Some(format!("tournament/{tournament}/event/{}", &caps[2])),
            });
        }

        if let Some(caps) = TOURNAMENT_LINK.captures(trimmed) {
            return Ok(TournamentRef {
                slug: caps[1].to_string(),
                event_slug: None,
            });
        }

        if let Some(caps) = SHORTHAND_LINK.captures(trimmed) {
            let short = &caps[1];
            if !RESERVED_SEGMENTS.contains(&short) {
                return Ok(TournamentRef {
                    slug: short.to_string(),
                    event_slug: None,
                });
            }
        }

        Err(Error::InvalidInput {
            input: trimmed.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TournamentRef {
        input.parse().unwrap()
    }

    #[test]
    fn equivalent_tournament_shapes_resolve_identically() {
        let want = TournamentRef {
            slug: "evo-2023".into(),
            event_slug: None,
        };
        for input in [
            "https://www.start.gg/tournament/evo-2023",
            "https://start.gg/tournament/evo-2023/details",
            "start.gg/tournament/evo-2023",
            "tournament/evo-2023",
            "  tournament/evo-2023  ",
        ] {
            assert_eq!(parse(input), want, "input: {input}");
        }
    }

    #[test]
    fn event_links_keep_the_full_event_slug() {
        let want = TournamentRef {
            slug: "evo-2023".into(),
            event_slug: Some("tournament/evo-2023/event/street-fighter-6".into()),
        };
        for input in [
            "https://www.start.gg/tournament/evo-2023/event/street-fighter-6",
            "start.gg/tournament/evo-2023/event/street-fighter-6/overview",
            "tournament/evo-2023/event/street-fighter-6",
        ] {
            assert_eq!(parse(input), want, "input: {input}");
        }
    }

    #[test]
    fn bracket_urls_resolve_to_their_event() {
        let r = parse("https://start.gg/tournament/evo-2023/event/guilty-gear-strive/brackets/1386815/2143354");
        assert_eq!(r.slug, "evo-2023");
        assert_eq!(
            r.event_slug.as_deref(),
            Some("tournament/evo-2023/event/guilty-gear-strive")
        );
    }

    #[test]
    fn shorthand_requires_the_domain() {
        assert_eq!(
            parse("https://start.gg/evo"),
            TournamentRef {
                slug: "evo".into(),
                event_slug: None,
            }
        );
        assert_eq!(parse("www.start.gg/evo").slug, "evo");
        assert!(matches!(
            "evo".parse::<TournamentRef>(),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn unrecognized_input_is_invalid() {
        for input in [
            "not-a-url",
            "",
            "https://example.com/tournaments/evo-2023",
            "start.gg/",
            "smash.gg/evo",
        ] {
            assert!(
                matches!(
                    input.parse::<TournamentRef>(),
                    Err(Error::InvalidInput { .. })
                ),
                "input: {input}"
            );
        }
    }

    #[test]
    fn truncated_urls_are_invalid() {
        for input in ["start.gg/tournament", "https://www.start.gg/event"] {
            assert!(
                matches!(
                    input.parse::<TournamentRef>(),
                    Err(Error::InvalidInput { .. })
                ),
                "input: {input}"
            );
        }
    }
}
