use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use startgg::{Client, Event, TournamentRef, format};

/// Token file location under the user's config dir: `topcut/token`.
const CONFIG_DIR: &str = "topcut";
const TOKEN_FILE: &str = "token";

#[derive(Parser)]
#[command(
    name = "topcut",
    about = "Print final standings for a start.gg tournament or event",
    version
)]
pub struct Cli {
    /// Tournament or event link: a start.gg URL, `tournament/<slug>`,
    /// or `start.gg/<shorthand>`
    link: String,

    /// Show only the first N places
    #[arg(short = 'n', long, value_name = "N")]
    places: Option<usize>,

    /// start.gg API token
    #[arg(long, env = "STARTGG_TOKEN")]
    token: Option<String>,

    /// GraphQL endpoint to query
    #[arg(long, default_value = startgg::DEFAULT_ENDPOINT)]
    endpoint: String,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let reference: TournamentRef = self.link.parse().into_diagnostic()?;

        // Token: --token / STARTGG_TOKEN (clap reads both) → token file.
        let token = self.token.or_else(read_token_file).ok_or_else(|| {
            let path = token_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("~/.config/{CONFIG_DIR}/{TOKEN_FILE}"));
            miette::miette!(
                "no start.gg API token found — pass --token, set STARTGG_TOKEN, \
                 or put one in {path}"
            )
        })?;

        let client = Client::with_endpoint(&self.endpoint, token);
        let results = client.results(&reference).await.into_diagnostic()?;

        // Everything is fetched by now; a failure above leaves stdout empty.
        let event_mode = reference.event_slug.is_some();
        for (i, event_results) in results.events.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", header(&event_results.event, event_mode));
            print!(
                "{}",
                format::render(&event_results.placements, self.places)
            );
        }

        Ok(())
    }
}

/// Header line above each event's placements. Event mode names the
/// tournament (the event was already in the link); tournament mode labels
/// each event in turn.
fn header(event: &Event, event_mode: bool) -> String {
    if event_mode {
        format!("{} - {}", event.tournament, event.game)
    } else {
        format!("{} - {}", event.game, event.name)
    }
}

fn token_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(TOKEN_FILE))
}

fn read_token_file() -> Option<String> {
    read_token_at(&token_file_path()?)
}

/// Read and trim a token file. A missing or whitespace-only file is no
/// token.
fn read_token_at(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let token = contents.trim();
    (!token.is_empty()).then(|| token.to_string())
}
