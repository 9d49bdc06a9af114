/// Core domain types for spotcheck mismatches, tags, and content keys.
use serde::{Deserialize, Serialize};

/// Calendar entry type carried by a calendar content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[expect(clippy::arbitrary_source_item_ordering, reason = "serde(other) must be the last variant")]
pub enum CalendarType {
    /// An active list supplement.
    ActiveList,
    /// The main floor calendar.
    FloorCalendar,
    /// A supplemental floor calendar.
    SupplementalCalendar,
    /// Any calendar type with no dedicated view.
    #[serde(other)]
    Other,
}

/// Identifies a committee an agenda belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitteeId {
    /// Committee name, e.g. `Finance`.
    pub name: String,
}

/// Agenda number within a year. A non-positive year means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgendaId {
    /// Agenda number.
    pub number: i32,
    /// Agenda year.
    pub year: i32,
}

/// Legislative session a bill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// Session start year.
    pub year: i32,
}

/// Locator for the content a mismatch was found in. The variant is inferred
/// from the fields present, matching the shapes the admin API emits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ContentKey {
    /// A committee agenda.
    #[serde(rename_all = "camelCase")]
    Agenda {
        /// Year and number of the agenda.
        agenda_id: AgendaId,
        /// Committee the agenda belongs to.
        committee_id: CommitteeId,
    },
    /// A bill, optionally pinned to an amendment version.
    #[serde(rename_all = "camelCase")]
    Bill {
        /// Print number without the amendment suffix.
        base_print_no: String,
        /// Full print number; absent on base bill ids.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        print_no: Option<String>,
        /// Session year.
        session: Session,
        /// Amendment version, `DEFAULT` for the original print.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },
    /// A floor calendar or active list.
    #[serde(rename_all = "camelCase")]
    Calendar {
        /// Calendar number.
        cal_no: i32,
        /// Calendar entry type, if known.
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        cal_type: Option<CalendarType>,
        /// Calendar year.
        year: i32,
    },
}

/// Category of legislative content, used to select a URL builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Committee agendas.
    Agenda,
    /// Bills and resolutions.
    Bill,
    /// Floor calendars.
    Calendar,
}

impl ContentType {
    /// Parse a content-type tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        return match tag {
            "AGENDA" => Some(Self::Agenda),
            "BILL" => Some(Self::Bill),
            "CALENDAR" => Some(Self::Calendar),
            _ => None,
        };
    }
}

/// Origin of the reference data a mismatch was compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Legislative Bill Drafting Commission data, compared against Open Legislation.
    Lbdc,
    /// NYSenate.gov, compared against Open Legislation as the reference.
    NySenate,
}

impl DataSource {
    /// Every known data source, in display order.
    pub const ALL: [Self; 2] = [Self::Lbdc, Self::NySenate];

    /// Parse a data-source tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        return match tag {
            "LBDC" => Some(Self::Lbdc),
            "NYSENATE" => Some(Self::NySenate),
            _ => None,
        };
    }

    /// The wire tag for this data source.
    pub const fn tag(self) -> &'static str {
        return match self {
            Self::Lbdc => "LBDC",
            Self::NySenate => "NYSENATE",
        };
    }
}

/// How long an ignored mismatch stays ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IgnoreLevel {
    /// Ignore for the current report only.
    IgnoreOnce,
    /// Ignore forever.
    IgnorePermanently,
    /// Ignore until the mismatch is resolved.
    IgnoreUntilResolved,
    /// Clear any ignore.
    NotIgnored,
}

impl IgnoreLevel {
    /// The wire tag sent as the `ignoreLevel` parameter.
    pub const fn tag(self) -> &'static str {
        return match self {
            Self::IgnoreOnce => "IGNORE_ONCE",
            Self::IgnorePermanently => "IGNORE_PERMANENTLY",
            Self::IgnoreUntilResolved => "IGNORE_UNTIL_RESOLVED",
            Self::NotIgnored => "NOT_IGNORED",
        };
    }
}

/// A detected discrepancy between reference and observed content.
///
/// Tags stay as strings so a record with an unrecognized tag still parses
/// and renders with fallback labels. The key is kept raw and interpreted on
/// demand for the same reason.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mismatch {
    /// Content type tag (`AGENDA`, `BILL`, `CALENDAR`).
    pub content_type: String,
    /// Data source tag (`LBDC`, `NYSENATE`).
    pub data_source: String,
    /// Raw content key as received.
    #[serde(default)]
    pub key: serde_json::Value,
    /// Server-side mismatch identifier.
    pub mismatch_id: i64,
    /// Kind of mismatch, e.g. `BILL_TEXT_CONTENT`.
    #[serde(default)]
    pub mismatch_type: String,
    /// Content as observed on this system.
    #[serde(default)]
    pub observed_data: String,
    /// Content as found in the reference source.
    #[serde(default)]
    pub reference_data: String,
    /// Report type tag, e.g. `LBDC_DAYBREAK`.
    #[serde(default)]
    pub ref_type: String,
}

impl Mismatch {
    /// Interpret the raw key. Returns `None` if it matches no known key shape.
    pub fn content_key(&self) -> Option<ContentKey> {
        return serde_json::from_value(self.key.clone()).ok();
    }
}
