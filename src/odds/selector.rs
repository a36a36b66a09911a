use crate::config::provider_name;
use crate::types::{CanonicalOdds, ProviderOdds};

/// The provider whose series populate a summary's flat odds fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub provider_id: &'a str,
    pub provider_name: Option<&'static str>,
    pub odds: &'a CanonicalOdds,
}

/// First provider in `preference` with at least one non-empty market.
///
/// Data richness elsewhere is not considered: a preferred provider with a
/// single quoted market beats a later provider quoting all four. Providers
/// absent from `preference` are never selected.
pub fn select_provider<'a>(odds: &'a ProviderOdds, preference: &[&str]) -> Option<Selection<'a>> {
    preference.iter().find_map(|id| {
        let (provider_id, series) = odds.get_key_value(*id)?;
        series.has_observations().then(|| Selection {
            provider_id: provider_id.as_str(),
            provider_name: provider_name(provider_id),
            odds: series,
        })
    })
}
