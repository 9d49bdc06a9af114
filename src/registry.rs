//! Static label registries for data sources and report types.
//!
//! Every lookup is total: an unknown tag maps to a fixed fallback label so
//! one unrecognized record never breaks rendering of a whole list.

use crate::types::DataSource;

/// Label for a report type tag that is not registered.
pub const UNKNOWN_CONTENT: &str = "Content";
/// Label for a data-source tag that is not registered.
pub const UNKNOWN_DATA_SOURCE: &str = "Unknown DataSource";

/// Display labels for one data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceDescriptor {
    /// Heading for the comparison, e.g. `LBDC - OpenLegislation`.
    pub comparison_label: &'static str,
    /// Label of the side holding the observed data.
    pub data_label: &'static str,
    /// Whether Open Legislation acts as the reference in this comparison.
    pub open_leg_reference: bool,
    /// Label of the reference side.
    pub ref_label: &'static str,
}

/// Look up the descriptor for a known data source.
pub const fn descriptor(source: DataSource) -> DataSourceDescriptor {
    return match source {
        DataSource::Lbdc => DataSourceDescriptor {
            comparison_label: "LBDC - OpenLegislation",
            data_label: "Open Legislation",
            open_leg_reference: false,
            ref_label: "LBDC",
        },
        DataSource::NySenate => DataSourceDescriptor {
            comparison_label: "OpenLegislation - NYSenate.gov",
            data_label: "NYSenate.gov",
            open_leg_reference: true,
            ref_label: "Open Legislation",
        },
    };
}

/// Heading for a comparison, or the unknown fallback.
pub fn comparison_label(tag: &str) -> &'static str {
    return DataSource::from_tag(tag).map_or(UNKNOWN_DATA_SOURCE, |s| return descriptor(s).comparison_label);
}

/// Label of the observed-data side, or the unknown fallback.
pub fn data_label(tag: &str) -> &'static str {
    return DataSource::from_tag(tag).map_or(UNKNOWN_DATA_SOURCE, |s| return descriptor(s).data_label);
}

/// Whether Open Legislation is the reference side. Unknown tags are not.
pub fn is_open_leg_reference(tag: &str) -> bool {
    return DataSource::from_tag(tag).is_some_and(|s| return descriptor(s).open_leg_reference);
}

/// Label of the reference side, or the unknown fallback.
pub fn ref_label(tag: &str) -> &'static str {
    return DataSource::from_tag(tag).map_or(UNKNOWN_DATA_SOURCE, |s| return descriptor(s).ref_label);
}

/// Short label for a report type tag.
pub fn report_type_label(tag: &str) -> &'static str {
    return match tag {
        "LBDC_AGENDA_ALERT" | "SENATE_SITE_AGENDA" => "Agenda",
        "LBDC_CALENDAR_ALERT" => "Floor Cal",
        "LBDC_DAYBREAK" | "LBDC_SCRAPED_BILL" | "SENATE_SITE_BILLS" => "Bill",
        "SENATE_SITE_CALENDAR" => "Calendar",
        _ => UNKNOWN_CONTENT,
    };
}
