//! Raw versus filtered counts for display.

use crate::filter::{ClassificationEvent, FilterReport, resolve_species};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw and filtered record counts for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesCount {
    /// Resolved species label.
    pub species: String,
    /// Records before filtering.
    pub raw: usize,
    /// Records after filtering.
    pub filtered: usize,
}

/// Per-species counts, sorted by descending raw count then name.
pub fn species_counts(
    raw: &[ClassificationEvent],
    filtered: &[ClassificationEvent],
) -> Vec<SpeciesCount> {
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();

    for record in raw {
        counts.entry(resolve_species(record)).or_default().0 += 1;
    }
    for record in filtered {
        counts.entry(resolve_species(record)).or_default().1 += 1;
    }

    let mut rows: Vec<SpeciesCount> = counts
        .into_iter()
        .map(|(species, (raw, filtered))| SpeciesCount {
            species,
            raw,
            filtered,
        })
        .collect();

    rows.sort_by(|a, b| b.raw.cmp(&a.raw).then_with(|| a.species.cmp(&b.species)));
    rows
}

/// Render per-species counts as an aligned text table.
pub fn render_species_table(rows: &[SpeciesCount]) -> String {
    let width = rows
        .iter()
        .map(|r| r.species.chars().count())
        .chain(std::iter::once("Species".len()))
        .max()
        .unwrap_or(0);

    let header = format!("{:<width$}  {:>8}  {:>8}", "Species", "Raw", "Filtered");
    let body = rows.iter().map(|row| {
        format!(
            "{:<width$}  {:>8}  {:>8}",
            row.species, row.raw, row.filtered
        )
    });

    std::iter::once(header)
        .chain(body)
        .map(|line| line + "\n")
        .collect()
}

/// One-line description of a filter run.
pub fn describe_report(report: &FilterReport) -> String {
    format!(
        "{} of {} records kept ({} below confidence, {} without timestamp, {} of {} sessions accepted, {} debounced)",
        report.output,
        report.input,
        report.input.saturating_sub(report.passed_confidence),
        report.unparseable_timestamps,
        report.sessions_accepted,
        report.sessions_found,
        report.in_accepted_sessions.saturating_sub(report.output),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn records(values: Vec<Value>) -> Vec<ClassificationEvent> {
        values
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_species_counts() {
        let raw = records(vec![
            json!({"species": "bee"}),
            json!({"species": "bee"}),
            json!({"predicted_class": "wasp"}),
            json!({}),
        ]);
        let filtered = records(vec![json!({"species": "bee"})]);

        let rows = species_counts(&raw, &filtered);
        assert_eq!(
            rows[0],
            SpeciesCount {
                species: "bee".to_string(),
                raw: 2,
                filtered: 1
            }
        );
        assert_eq!(rows[1].species, "Unknown");
        assert_eq!(rows[2].species, "wasp");
        assert_eq!(rows[2].filtered, 0);
    }

    #[test]
    fn test_render_species_table() {
        let table = render_species_table(&[SpeciesCount {
            species: "bee".to_string(),
            raw: 12,
            filtered: 3,
        }]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Species"));
        assert!(lines[1].starts_with("bee"));
        assert!(lines[1].ends_with("3"));
    }

    #[test]
    fn test_render_species_table_aligns_rows() {
        let table = render_species_table(&[
            SpeciesCount {
                species: "Episyrphus balteatus".to_string(),
                raw: 120,
                filtered: 14,
            },
            SpeciesCount {
                species: "bee".to_string(),
                raw: 7,
                filtered: 0,
            },
        ]);

        assert!(table.ends_with('\n'));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
        assert_eq!(lines[2], format!("{:<20}  {:>8}  {:>8}", "bee", 7, 0));
    }

    #[test]
    fn test_render_species_table_empty() {
        assert_eq!(
            render_species_table(&[]),
            format!("Species  {:>8}  {:>8}\n", "Raw", "Filtered")
        );
    }

    #[test]
    fn test_describe_report() {
        let report = FilterReport {
            input: 10,
            passed_confidence: 8,
            unparseable_timestamps: 1,
            sessions_found: 3,
            sessions_accepted: 2,
            in_accepted_sessions: 5,
            output: 2,
        };
        assert_eq!(
            describe_report(&report),
            "2 of 10 records kept (2 below confidence, 1 without timestamp, 2 of 3 sessions accepted, 3 debounced)"
        );
    }
}
