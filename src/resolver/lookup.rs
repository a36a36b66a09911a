use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::snapshot::value::{first_result, id_string, text};
use crate::snapshot::Snapshot;
use crate::types::{CompetitionRef, CountryRef, RawMatch, TeamRef};

/// id → reference lookups, built once per snapshot and read-only after.
#[derive(Debug, Default)]
pub struct LookupTables {
    pub teams: HashMap<String, TeamRef>,
    pub competitions: HashMap<String, CompetitionRef>,
    pub countries: HashMap<String, CountryRef>,
}

/// References resolved for one match. Any of them may be missing; the
/// summary then carries null for the dependent field.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolvedRefs<'a> {
    pub home: Option<&'a TeamRef>,
    pub away: Option<&'a TeamRef>,
    pub competition_id: Option<&'a str>,
    pub competition: Option<&'a CompetitionRef>,
    pub country: Option<&'a CountryRef>,
}

impl LookupTables {
    pub fn build(snapshot: &Snapshot) -> Self {
        let teams = build_wrapped(&snapshot.team_info, |id, rec| TeamRef {
            id,
            name: rec.get("name").and_then(text),
            competition_id: rec.get("competition_id").and_then(id_string),
            country_id: rec.get("country_id").and_then(id_string),
        });

        let competitions = build_wrapped(&snapshot.competition_info, |id, rec| CompetitionRef {
            id,
            name: rec.get("name").and_then(text),
            country_id: rec.get("country_id").and_then(id_string),
        });

        let countries: HashMap<String, CountryRef> = snapshot
            .countries
            .iter()
            .filter_map(|c| {
                let id = c.get("id").and_then(id_string)?;
                let name = c.get("name").and_then(text);
                Some((id.clone(), CountryRef { id, name }))
            })
            .collect();

        debug!(
            teams = teams.len(),
            competitions = competitions.len(),
            countries = countries.len(),
            "[RESOLVER] lookup tables built"
        );

        Self {
            teams,
            competitions,
            countries,
        }
    }

    /// Plain lookups. The competition id falls back to the home team's
    /// competition linkage, and the country to the home team's country, when
    /// the match or competition does not carry one.
    pub fn resolve<'a>(&'a self, m: &'a RawMatch) -> ResolvedRefs<'a> {
        let home = m.home_team_id.as_deref().and_then(|id| self.teams.get(id));
        let away = m.away_team_id.as_deref().and_then(|id| self.teams.get(id));

        let competition_id = m
            .competition_id
            .as_deref()
            .or_else(|| home.and_then(|t| t.competition_id.as_deref()));
        let competition = competition_id.and_then(|id| self.competitions.get(id));

        let country = competition
            .and_then(|c| c.country_id.as_deref())
            .or_else(|| home.and_then(|t| t.country_id.as_deref()))
            .and_then(|id| self.countries.get(id));

        ResolvedRefs {
            home,
            away,
            competition_id,
            competition,
            country,
        }
    }
}

/// Builds a table from an `id → {results: [record, ...]}` section. Wrappers
/// with an empty or missing results list produce no entry.
fn build_wrapped<T>(section: &Map<String, Value>, make: impl Fn(String, &Value) -> T) -> HashMap<String, T> {
    section
        .iter()
        .filter_map(|(id, wrapper)| {
            let rec = first_result(wrapper)?;
            Some((id.clone(), make(id.clone(), rec)))
        })
        .collect()
}
