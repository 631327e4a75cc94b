//! Location entity recognition
//!
//! Known location names are matched as substrings of the lower-cased input,
//! longest name first. Each match is cut out of the working text before
//! shorter names are tried, so "United States" is never reported again as
//! "United" or "States".

use crate::storage::StatsGateway;

/// Known location names, lower-cased and de-duplicated
///
/// Kept in matching order: longest first, ties alphabetical.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    names: Vec<String>,
}

impl EntityCatalog {
    /// Build a catalog from raw names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        names.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        names.dedup();

        Self { names }
    }

    /// Load every location known to the gateway
    ///
    /// An unreachable store yields an empty catalog; the assistant then
    /// answers from context and the knowledge base only.
    pub fn from_gateway(gateway: &dyn StatsGateway) -> Self {
        match gateway.all_known_locations() {
            Ok(locations) => {
                let catalog = Self::new(locations);
                tracing::info!(locations = catalog.len(), "Loaded locations for entity extraction");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load locations, entity extraction disabled");
                Self::default()
            }
        }
    }

    /// Names in matching order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Longest-first consuming substring matcher
#[derive(Debug, Clone, Default)]
pub struct EntityRecognizer {
    catalog: EntityCatalog,
}

impl EntityRecognizer {
    /// Create a recognizer over `catalog`
    pub fn new(catalog: EntityCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this recognizer matches against
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Locations mentioned in `text`, longest first, lower-cased
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut working = text.to_lowercase();
        let mut found = Vec::new();

        for name in self.catalog.names() {
            if working.contains(name.as_str()) {
                found.push(name.clone());
                working = working.replace(name.as_str(), " ");
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryStats;
    use crate::storage::MockStatsGateway;
    use proptest::prelude::*;

    fn recognizer(names: &[&str]) -> EntityRecognizer {
        EntityRecognizer::new(EntityCatalog::new(names.iter().copied()))
    }

    #[test]
    fn test_longest_match_consumes_text() {
        let r = recognizer(&["United", "States", "United States"]);
        assert_eq!(r.extract("stats for United States"), vec!["united states"]);
    }

    #[test]
    fn test_multiple_entities_longest_first() {
        let r = recognizer(&["India", "United Kingdom", "Chad"]);
        assert_eq!(
            r.extract("compare india and the united kingdom"),
            vec!["united kingdom", "india"]
        );
    }

    #[test]
    fn test_shorter_name_still_found_elsewhere() {
        let r = recognizer(&["Niger", "Nigeria"]);
        assert_eq!(r.extract("nigeria and niger"), vec!["nigeria", "niger"]);
    }

    #[test]
    fn test_no_entities() {
        let r = recognizer(&["India"]);
        assert!(r.extract("is the vaccine safe").is_empty());
        assert!(EntityRecognizer::default().extract("india").is_empty());
    }

    #[test]
    fn test_catalog_normalizes_names() {
        let catalog = EntityCatalog::new(["India", "india ", "", "Peru"]);
        assert_eq!(catalog.names(), &["india", "peru"]);
    }

    #[test]
    fn test_catalog_from_gateway() {
        let mock = MockStatsGateway::with_rows(vec![CountryStats::new("Brazil", 1, 80.0)]);
        assert_eq!(EntityCatalog::from_gateway(&mock).names(), &["brazil"]);

        mock.set_unavailable("down for maintenance");
        assert!(EntityCatalog::from_gateway(&mock).is_empty());
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        "[a-z]{3,8}( [a-z]{3,8})?"
    }

    proptest! {
        #[test]
        fn prop_results_are_unique_catalog_members(
            names in prop::collection::vec(name_strategy(), 1..8),
            text in "[a-zA-Z ]{0,60}",
        ) {
            let catalog = EntityCatalog::new(&names);
            let found = EntityRecognizer::new(catalog.clone()).extract(&text);

            let mut deduped = found.clone();
            deduped.dedup();
            prop_assert_eq!(&deduped, &found);

            for name in &found {
                prop_assert!(catalog.names().contains(name));
                // Cut-out matches leave a space, so only single words are
                // guaranteed to occur verbatim in the input
                if !name.contains(' ') {
                    prop_assert!(text.to_lowercase().contains(name.as_str()));
                }
            }
        }

        #[test]
        fn prop_exact_name_is_reported_first(
            names in prop::collection::vec(name_strategy(), 1..8),
            pick in any::<prop::sample::Index>(),
        ) {
            let target = pick.get(&names).clone();
            let found = EntityRecognizer::new(EntityCatalog::new(&names)).extract(&target);
            prop_assert_eq!(found.first(), Some(&target));
        }

        #[test]
        fn prop_results_never_grow_in_length(
            names in prop::collection::vec(name_strategy(), 1..8),
            text in "[a-z ]{0,60}",
        ) {
            let found = EntityRecognizer::new(EntityCatalog::new(&names)).extract(&text);
            for pair in found.windows(2) {
                prop_assert!(pair[0].chars().count() >= pair[1].chars().count());
            }
        }
    }
}
