//! The continent → subregion → country tree.
//!
//! Built once from a provider dump and never mutated afterwards. Ordering is
//! the provider's order of first appearance; sorting for display happens in
//! [`crate::grouping`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::provider::{RegionProvider, RegionRecord, WORLD_REGION_CODE};

/// A subregion and the countries it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subregion {
    pub code: String,
    pub countries: Vec<String>,
}

/// A continent and the subregions it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    pub code: String,
    pub subregions: Vec<Subregion>,
}

/// Where a country sits in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPath<'a> {
    pub continent: &'a str,
    pub subregion: &'a str,
}

/// The full set of continents.
///
/// Every country appears under exactly one subregion and every subregion
/// under exactly one continent. The world pseudo-region is never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    continents: Vec<Continent>,
}

impl Catalog {
    /// Build a catalog from everything the provider reports.
    pub fn build<P: RegionProvider + ?Sized>(provider: &P) -> Self {
        Self::from_records(&provider.list_regions())
    }

    /// Build a catalog from a flat list of records.
    ///
    /// Regions without a parent continent become continents and their
    /// children are taken as subregion codes. Regions with a parent and
    /// children map a subregion to its countries. Leaf regions carry no
    /// extra information and are ignored.
    pub fn from_records(records: &[RegionRecord]) -> Self {
        let mut continent_children: Vec<(&str, &[String])> = Vec::new();
        let mut subregion_children: HashMap<&str, &[String]> = HashMap::new();

        for record in records {
            if record.code == WORLD_REGION_CODE {
                continue;
            }
            if record.is_continent() {
                continent_children.push((record.code.as_str(), record.children.as_slice()));
            } else if !record.children.is_empty() {
                subregion_children
                    .entry(record.code.as_str())
                    .or_insert(record.children.as_slice());
            }
        }

        let mut seen_continents: HashSet<&str> = HashSet::new();
        let mut seen_subregions: HashSet<&str> = HashSet::new();
        let mut seen_countries: HashSet<&str> = HashSet::new();
        let mut continents = Vec::with_capacity(continent_children.len());

        for (continent_code, subregion_codes) in continent_children {
            if !seen_continents.insert(continent_code) {
                warn!("Continent '{}' reported twice, keeping the first", continent_code);
                continue;
            }

            let mut subregions = Vec::with_capacity(subregion_codes.len());
            for subregion_code in subregion_codes {
                if !seen_subregions.insert(subregion_code.as_str()) {
                    warn!(
                        "Subregion '{}' listed under more than one continent, keeping the first",
                        subregion_code
                    );
                    continue;
                }

                let country_codes = subregion_children
                    .get(subregion_code.as_str())
                    .copied()
                    .unwrap_or_default();
                let mut countries = Vec::with_capacity(country_codes.len());
                for country in country_codes {
                    if seen_countries.insert(country.as_str()) {
                        countries.push(country.clone());
                    } else {
                        warn!(
                            "Country '{}' listed under more than one subregion, keeping the first",
                            country
                        );
                    }
                }

                subregions.push(Subregion {
                    code: subregion_code.clone(),
                    countries,
                });
            }

            continents.push(Continent {
                code: continent_code.to_string(),
                subregions,
            });
        }

        debug!(
            "Built catalog: {} continents, {} subregions, {} countries",
            continents.len(),
            seen_subregions.len(),
            seen_countries.len()
        );

        Self { continents }
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.continents.is_empty()
    }

    /// Every subregion, continent by continent.
    pub fn subregions(&self) -> impl Iterator<Item = &Subregion> {
        self.continents.iter().flat_map(|c| c.subregions.iter())
    }

    /// Every country code, subregion by subregion.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.subregions()
            .flat_map(|s| s.countries.iter().map(String::as_str))
    }

    #[must_use]
    pub fn country_count(&self) -> usize {
        self.subregions().map(|s| s.countries.len()).sum()
    }

    /// Locate the continent and subregion holding a country.
    pub fn path_to(&self, country: &str) -> Option<CountryPath<'_>> {
        self.continents.iter().find_map(|continent| {
            continent.subregions.iter().find_map(|subregion| {
                subregion
                    .countries
                    .iter()
                    .any(|c| c == country)
                    .then(|| CountryPath {
                        continent: &continent.code,
                        subregion: &subregion.code,
                    })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{europe_records, sample_records};

    #[test]
    fn builds_two_level_tree() {
        let catalog = Catalog::from_records(&europe_records());
        assert_eq!(catalog.continents().len(), 1);

        let europe = &catalog.continents()[0];
        assert_eq!(europe.code, "150");
        assert_eq!(europe.subregions.len(), 1);
        assert_eq!(europe.subregions[0].code, "155");
        assert_eq!(europe.subregions[0].countries, vec!["FR", "DE"]);
    }

    #[test]
    fn world_region_is_excluded() {
        let catalog = Catalog::from_records(&sample_records());
        assert!(catalog.continents().iter().all(|c| c.code != WORLD_REGION_CODE));
        assert!(catalog.path_to(WORLD_REGION_CODE).is_none());
    }

    #[test]
    fn every_country_has_exactly_one_path() {
        let records = sample_records();
        let catalog = Catalog::from_records(&records);

        let leaves: Vec<&RegionRecord> = records
            .iter()
            .filter(|r| r.continent.is_some() && r.children.is_empty())
            .collect();
        assert_eq!(catalog.country_count(), leaves.len());

        for leaf in leaves {
            let hits = catalog.countries().filter(|c| *c == leaf.code).count();
            assert_eq!(hits, 1, "{} should appear once", leaf.code);
            let path = catalog.path_to(&leaf.code).unwrap();
            assert_eq!(Some(path.continent), leaf.continent.as_deref());
        }
    }

    #[test]
    fn empty_provider_yields_empty_catalog() {
        let catalog = Catalog::build(&Vec::<RegionRecord>::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.country_count(), 0);
    }

    #[test]
    fn duplicated_country_keeps_first_subregion() {
        let records = vec![
            RegionRecord::continent("150", &["155", "154"]),
            RegionRecord::within("155", "150", &["FR", "DE"]),
            RegionRecord::within("154", "150", &["SE", "DE"]),
        ];
        let catalog = Catalog::from_records(&records);
        assert_eq!(catalog.country_count(), 3);
        assert_eq!(catalog.path_to("DE").unwrap().subregion, "155");
    }

    #[test]
    fn duplicated_subregion_keeps_first_continent() {
        let records = vec![
            RegionRecord::continent("150", &["155"]),
            RegionRecord::continent("142", &["155", "030"]),
            RegionRecord::within("155", "150", &["FR"]),
            RegionRecord::within("030", "142", &["JP"]),
        ];
        let catalog = Catalog::from_records(&records);
        assert_eq!(catalog.subregions().count(), 2);
        assert_eq!(catalog.path_to("FR").unwrap().continent, "150");
    }

    #[test]
    fn unknown_subregion_becomes_empty() {
        let records = vec![RegionRecord::continent("010", &["AQ-X"])];
        let catalog = Catalog::from_records(&records);
        assert_eq!(catalog.continents()[0].subregions[0].code, "AQ-X");
        assert!(catalog.continents()[0].subregions[0].countries.is_empty());
    }

    #[test]
    fn keeps_provider_order() {
        let catalog = Catalog::from_records(&sample_records());
        let codes: Vec<&str> = catalog.continents().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["150", "002", "019"]);
    }
}
