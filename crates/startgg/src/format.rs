use std::fmt::Write;

use crate::client::Placement;

/// Render placements as printable text, one `"rank. entrant"` line per
/// record, in the order given. A limit keeps only the first `limit`
/// records, counted positionally so ties cannot inflate the line count.
pub fn render(placements: &[Placement], limit: Option<usize>) -> String {
    let shown = match limit {
        Some(n) => &placements[..n.min(placements.len())],
        None => placements,
    };

    let mut out = String::new();
    for p in shown {
        let _ = writeln!(out, "{}. {}", p.rank, p.entrant);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placements(n: u32) -> Vec<Placement> {
        (1..=n)
            .map(|rank| Placement {
                rank,
                entrant: format!("player-{rank}"),
            })
            .collect()
    }

    #[test]
    fn limit_truncates_to_exactly_that_many_lines() {
        let out = render(&placements(20), Some(16));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "1. player-1");
        assert_eq!(lines[15], "16. player-16");
    }

    #[test]
    fn no_limit_renders_everything() {
        let out = render(&placements(20), None);
        assert_eq!(out.lines().count(), 20);
    }

    #[test]
    fn limit_beyond_the_list_is_harmless() {
        let out = render(&placements(3), Some(16));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn ties_count_against_the_limit_positionally() {
        // Two entrants tied for 3rd: limit 3 still means three lines.
        let tied = vec![
            Placement {
                rank: 1,
                entrant: "a".into(),
            },
            Placement {
                rank: 2,
                entrant: "b".into(),
            },
            Placement {
                rank: 3,
                entrant: "c".into(),
            },
            Placement {
                rank: 3,
                entrant: "d".into(),
            },
        ];
        assert_eq!(render(&tied, Some(3)), "1. a\n2. b\n3. c\n");
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render(&[], None), "");
        assert_eq!(render(&[], Some(16)), "");
    }
}
