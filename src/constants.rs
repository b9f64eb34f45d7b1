use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde_derive::Serialize;

/// How the COVID API names a geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CovidRegion {
    pub region_type: &'static str,
    pub region_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDescriptor {
    pub key: &'static str,
    pub carbon_region_id: u32,
    /// `None` when the COVID API has nothing for this geography.
    pub covid: Option<CovidRegion>,
}

impl RegionDescriptor {
    const fn carbon_only(key: &'static str, carbon_region_id: u32) -> Self {
        Self { key, carbon_region_id, covid: None }
    }

    const fn with_covid(
        key: &'static str,
        carbon_region_id: u32,
        region_type: &'static str,
        region_name: &'static str,
    ) -> Self {
        Self {
            key,
            carbon_region_id,
            covid: Some(CovidRegion { region_type, region_name }),
        }
    }
}

/// Every region the service knows about, in carbon region id order.
pub static UK_REGIONS: [RegionDescriptor; 17] = [
    RegionDescriptor::carbon_only("northScotland", 1),
    RegionDescriptor::carbon_only("southScotland", 2),
    RegionDescriptor::with_covid("northWestEngland", 3, "Region", "North West"),
    RegionDescriptor::with_covid("northEastEngland", 4, "Region", "North East"),
    RegionDescriptor::with_covid("yorkshire", 5, "Region", "Yorkshire and The Humber"),
    RegionDescriptor::carbon_only("northWales", 6),
    RegionDescriptor::carbon_only("southWales", 7),
    RegionDescriptor::with_covid("westMidlands", 8, "Region", "West Midlands"),
    RegionDescriptor::with_covid("eastMidlands", 9, "Region", "East Midlands"),
    RegionDescriptor::with_covid("eastEngland", 10, "Region", "East of England"),
    RegionDescriptor::with_covid("southWestEngland", 11, "Region", "South West"),
    RegionDescriptor::carbon_only("southEngland", 12),
    RegionDescriptor::with_covid("london", 13, "Region", "London"),
    RegionDescriptor::with_covid("southEastEngland", 14, "Region", "South East"),
    RegionDescriptor::with_covid("england", 15, "Nation", "England"),
    RegionDescriptor::with_covid("scotland", 16, "Nation", "Scotland"),
    RegionDescriptor::with_covid("wales", 17, "Nation", "Wales"),
];

static REGIONS_BY_KEY: Lazy<HashMap<&'static str, &'static RegionDescriptor>> =
    Lazy::new(|| UK_REGIONS.iter().map(|region| (region.key, region)).collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityEntry {
    pub carbon: bool,
    pub covid: bool,
}

/// Which upstream data exists for each region key.
pub static DATA_AVAILABILITY: Lazy<BTreeMap<&'static str, AvailabilityEntry>> = Lazy::new(|| {
    UK_REGIONS
        .iter()
        .map(|region| {
            (
                region.key,
                AvailabilityEntry {
                    carbon: region.carbon_region_id > 0,
                    covid: region.covid.is_some(),
                },
            )
        })
        .collect()
});

pub fn region(key: &str) -> Option<&'static RegionDescriptor> {
    REGIONS_BY_KEY.get(key).copied()
}

/// Region keys that can be queried for COVID data, in registry order.
pub fn covid_regions() -> impl Iterator<Item = &'static str> {
    UK_REGIONS
        .iter()
        .filter(|region| region.covid.is_some())
        .map(|region| region.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        assert_eq!(REGIONS_BY_KEY.len(), UK_REGIONS.len());
    }

    #[test]
    fn carbon_ids_are_positive_and_distinct() {
        let mut ids: Vec<u32> = UK_REGIONS.iter().map(|r| r.carbon_region_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), UK_REGIONS.len());
        assert!(ids.iter().all(|id| *id > 0));
    }

    #[test]
    fn covid_region_types_are_known() {
        for region in UK_REGIONS.iter().filter_map(|r| r.covid) {
            assert!(matches!(region.region_type, "Region" | "Nation"));
            assert!(!region.region_name.is_empty());
        }
    }

    #[test]
    fn lookup_by_key() {
        let london = region("london").unwrap();
        assert_eq!(london.carbon_region_id, 13);
        assert_eq!(
            london.covid,
            Some(CovidRegion { region_type: "Region", region_name: "London" })
        );

        assert!(region("northScotland").unwrap().covid.is_none());
        assert!(region("atlantis").is_none());
        assert!(region("London").is_none());
    }

    #[test]
    fn availability_mirrors_registry() {
        assert_eq!(DATA_AVAILABILITY.len(), UK_REGIONS.len());
        for descriptor in UK_REGIONS.iter() {
            let entry = DATA_AVAILABILITY[descriptor.key];
            assert!(entry.carbon);
            assert_eq!(entry.covid, descriptor.covid.is_some());
        }
    }

    #[test]
    fn covid_regions_in_registry_order() {
        let keys: Vec<_> = covid_regions().collect();
        assert_eq!(keys.first(), Some(&"northWestEngland"));
        assert_eq!(keys.last(), Some(&"wales"));
        assert_eq!(keys.len(), 12);
        assert!(!keys.contains(&"southEngland"));
    }
}
