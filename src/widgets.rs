use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::aggregate::{
    aggregate_by_key, aggregate_by_range, count_all, count_where, field_equals,
};
use crate::data::loader;
use crate::data::model::{AggregateEntry, BucketRule, Dataset};

// ---------------------------------------------------------------------------
// Bucket presets
// ---------------------------------------------------------------------------

pub fn year_built_rules() -> Vec<BucketRule> {
    vec![
        BucketRule::new(1900.0, 1999.0, "1900s"),
        BucketRule::new(2000.0, 2009.0, "2000s"),
        BucketRule::new(2010.0, 2023.0, "2010s"),
    ]
}

pub fn num_floors_rules() -> Vec<BucketRule> {
    vec![
        BucketRule::new(1.0, 10.0, "1-10 floors"),
        BucketRule::new(11.0, 20.0, "11-20 floors"),
        BucketRule::new(21.0, 30.0, "21-30 floors"),
        BucketRule::new(31.0, 40.0, "31-40 floors"),
        BucketRule::new(41.0, 50.0, "41-50 floors"),
        BucketRule::new(51.0, f64::INFINITY, "51+ floors"),
    ]
}

// ---------------------------------------------------------------------------
// Widget catalogue
// ---------------------------------------------------------------------------

/// Every chart and callout on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    YearBuilt,
    NumFloors,
    BuildingClass,
    StationCount,
    RideTypes,
    MemberTypes,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::YearBuilt,
        WidgetKind::NumFloors,
        WidgetKind::BuildingClass,
        WidgetKind::StationCount,
        WidgetKind::RideTypes,
        WidgetKind::MemberTypes,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::YearBuilt => "Year built",
            WidgetKind::NumFloors => "Number of floors",
            WidgetKind::BuildingClass => "Building class",
            WidgetKind::StationCount => "Citibike stations",
            WidgetKind::RideTypes => "Ride types",
            WidgetKind::MemberTypes => "Rider types",
        }
    }

    /// Shown in place of the widget when its dataset cannot be loaded.
    pub fn unavailable_message(self) -> &'static str {
        match self {
            WidgetKind::YearBuilt | WidgetKind::NumFloors | WidgetKind::BuildingClass => {
                "Error loading building data."
            }
            WidgetKind::StationCount => "Error loading Citibike stations data.",
            WidgetKind::RideTypes | WidgetKind::MemberTypes => "Error loading Citibike rides data.",
        }
    }

    pub fn is_donut(self) -> bool {
        matches!(
            self,
            WidgetKind::YearBuilt | WidgetKind::NumFloors | WidgetKind::BuildingClass
        )
    }
}

/// What a finished widget job produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetOutput {
    Donut(Vec<AggregateEntry>),
    StationCount(usize),
    RideTypes { classic: usize, electric: usize },
    MemberTypes { casual: usize, member: usize },
    /// The widget's dataset could not be loaded.
    Unavailable,
}

/// Load the widget's dataset and compute its output. Each call performs
/// its own load; nothing is cached between widgets.
pub fn compute(kind: WidgetKind, config: &DashboardConfig) -> WidgetOutput {
    let path = match kind {
        WidgetKind::YearBuilt | WidgetKind::NumFloors | WidgetKind::BuildingClass => {
            config.buildings_path()
        }
        WidgetKind::StationCount => config.stations_path(),
        WidgetKind::RideTypes | WidgetKind::MemberTypes => config.rides_path(),
    };
    let dataset = loader::load(&path);
    if let Some(ds) = &dataset {
        log::debug!(
            "{}: {} records from {} ({})",
            kind.title(),
            ds.len(),
            ds.source,
            ds.column_names.join(", ")
        );
        if ds.is_empty() {
            log::warn!("{}: {} has no rows", kind.title(), ds.source);
        }
    }
    let output = compute_from(kind, dataset.as_ref());
    if output.is_none() {
        log::warn!("{} unavailable: could not load {}", kind.title(), path.display());
    }
    output.unwrap_or(WidgetOutput::Unavailable)
}

/// Compute from an already loaded dataset. `None` in, `None` out.
pub fn compute_from(kind: WidgetKind, dataset: Option<&Dataset>) -> Option<WidgetOutput> {
    let records = &dataset?.records;
    let output = match kind {
        WidgetKind::YearBuilt => {
            WidgetOutput::Donut(aggregate_by_range(records, "yearbuilt", &year_built_rules()))
        }
        WidgetKind::NumFloors => {
            WidgetOutput::Donut(aggregate_by_range(records, "numfloors", &num_floors_rules()))
        }
        WidgetKind::BuildingClass => WidgetOutput::Donut(aggregate_by_key(records, "bldgclass")),
        WidgetKind::StationCount => WidgetOutput::StationCount(count_all(records)),
        WidgetKind::RideTypes => WidgetOutput::RideTypes {
            classic: count_where(records, field_equals("rideable_type", "classic_bike")),
            electric: count_where(records, field_equals("rideable_type", "electric_bike")),
        },
        WidgetKind::MemberTypes => WidgetOutput::MemberTypes {
            casual: count_where(records, field_equals("member_casual", "casual")),
            member: count_where(records, field_equals("member_casual", "member")),
        },
    };
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    const BUILDINGS: &str = "bldgclass,yearbuilt,numfloors\n\
        D4,1905,6\n\
        O6,2005,55\n\
        D4,2015,12\n\
        R4,2015,0\n\
        O6,1850,3\n";

    const RIDES: &str = "ride_id,rideable_type,member_casual\n\
        a,classic_bike,member\n\
        b,classic_bike,casual\n\
        c,electric_bike,member\n\
        d,docked_bike,member\n";

    fn dataset(csv: &str) -> Dataset {
        load_from_reader("test", csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_unavailable_dataset_is_none() {
        for kind in WidgetKind::ALL {
            assert_eq!(compute_from(kind, None), None, "{kind:?}");
        }
    }

    #[test]
    fn test_year_built_donut() {
        let ds = dataset(BUILDINGS);
        let Some(WidgetOutput::Donut(entries)) = compute_from(WidgetKind::YearBuilt, Some(&ds))
        else {
            panic!("expected donut");
        };
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1900s", "2000s", "2010s"]);
        assert_eq!(entries[2].count, 2);
        assert_eq!(entries[2].percentage, "50.00");
    }

    #[test]
    fn test_num_floors_donut_skips_zero_floors() {
        let ds = dataset(BUILDINGS);
        let Some(WidgetOutput::Donut(entries)) = compute_from(WidgetKind::NumFloors, Some(&ds))
        else {
            panic!("expected donut");
        };
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1-10 floors", "51+ floors", "11-20 floors"]);
        assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_building_class_donut_counts_all() {
        let ds = dataset(BUILDINGS);
        let Some(WidgetOutput::Donut(entries)) =
            compute_from(WidgetKind::BuildingClass, Some(&ds))
        else {
            panic!("expected donut");
        };
        assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), ds.len());
        assert_eq!(entries[0].label, "D4");
        assert_eq!(entries[0].percentage, "40.00");
    }

    #[test]
    fn test_ride_and_member_counts() {
        let ds = dataset(RIDES);
        assert_eq!(
            compute_from(WidgetKind::RideTypes, Some(&ds)),
            Some(WidgetOutput::RideTypes { classic: 2, electric: 1 })
        );
        assert_eq!(
            compute_from(WidgetKind::MemberTypes, Some(&ds)),
            Some(WidgetOutput::MemberTypes { casual: 1, member: 3 })
        );
        assert_eq!(
            compute_from(WidgetKind::StationCount, Some(&ds)),
            Some(WidgetOutput::StationCount(4))
        );
    }

    #[test]
    fn test_compute_missing_files_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::default().with_data_dir(dir.path().to_path_buf());
        for kind in WidgetKind::ALL {
            assert_eq!(compute(kind, &config), WidgetOutput::Unavailable);
        }
    }
}
