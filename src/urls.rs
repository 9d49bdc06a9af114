//! Link construction for mismatched content.
//!
//! Three builder tables exist: content hosted on this system, the LBDC bill
//! search, and NYSenate.gov. A data source selects the table, the content
//! type selects the builder. Any miss yields `None`.

use crate::config::Paths;
use crate::types::{CalendarType, ContentKey, ContentType, DataSource};

/// Fixed LBDC query parameters preceding the session year.
const LBDC_BILL_QUERY: &str = "?NVDTO:=&QUERYTYPE=BILLNO&CBTEXT=Y&CBSPONMEMO=Y";

/// One of the three per-source builder tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlTable {
    /// LBDC bill search.
    Lbdc,
    /// Content hosted on this system.
    Local,
    /// NYSenate.gov.
    SenateSite,
}

/// Resolves content and reference links from configured path prefixes.
pub struct UrlResolver<'a> {
    /// Prefixes every builder joins onto.
    paths: &'a Paths,
}

impl<'a> UrlResolver<'a> {
    /// Dispatch to the builder for `content_type` within `table`.
    fn build(&self, table: UrlTable, content_type: ContentType, key: &ContentKey) -> Option<String> {
        return match (table, content_type) {
            (UrlTable::Lbdc, ContentType::Bill) => lbdc_bill_url(self.paths, key),
            (UrlTable::Lbdc, ContentType::Agenda | ContentType::Calendar) => None,
            (UrlTable::Local, ContentType::Agenda) => local_agenda_url(self.paths, key),
            (UrlTable::Local, ContentType::Bill) => local_bill_url(self.paths, key),
            (UrlTable::Local, ContentType::Calendar) => local_calendar_url(self.paths, key),
            // Meeting and session date-times are needed to link agendas and
            // calendars on NYSenate.gov, and mismatch keys don't carry them.
            (UrlTable::SenateSite, ContentType::Agenda | ContentType::Calendar) => None,
            (UrlTable::SenateSite, ContentType::Bill) => senate_site_bill_url(self.paths, key),
        };
    }

    /// Link to the observed content: on this system for LBDC comparisons,
    /// on NYSenate.gov for NYSenate comparisons.
    pub fn content_url(&self, key: &ContentKey, data_source: &str, content_type: &str) -> Option<String> {
        let table = match DataSource::from_tag(data_source)? {
            DataSource::Lbdc => UrlTable::Local,
            DataSource::NySenate => UrlTable::SenateSite,
        };
        return self.resolve(table, key, data_source, content_type);
    }

    /// Create a resolver over the given prefixes.
    pub const fn new(paths: &'a Paths) -> Self {
        return Self { paths };
    }

    /// Link to the reference content: the LBDC bill search for LBDC
    /// comparisons, this system for NYSenate comparisons.
    pub fn reference_url(&self, key: &ContentKey, data_source: &str, content_type: &str) -> Option<String> {
        let table = match DataSource::from_tag(data_source)? {
            DataSource::Lbdc => UrlTable::Lbdc,
            DataSource::NySenate => UrlTable::Local,
        };
        return self.resolve(table, key, data_source, content_type);
    }

    /// Shared tail of both lookups: parse the content type, build, log misses.
    fn resolve(&self, table: UrlTable, key: &ContentKey, data_source: &str, content_type: &str) -> Option<String> {
        let url = ContentType::from_tag(content_type).and_then(|ct| return self.build(table, ct, key));
        if url.is_none() {
            log::trace!("no {table:?} link for {data_source}/{content_type}");
        }
        return url;
    }
}

/// Whether a print number denotes a bill (`S`/`A` prefix) rather than a resolution.
fn is_bill_print_no(print_no: &str) -> bool {
    return print_no
        .chars()
        .next()
        .is_some_and(|c| return matches!(c.to_ascii_uppercase(), 'A' | 'S'));
}

/// LBDC bill search for a session year and print number.
fn lbdc_bill_url(paths: &Paths, key: &ContentKey) -> Option<String> {
    let ContentKey::Bill { base_print_no, print_no, session, .. } = key else {
        return None;
    };
    let print_no = print_no.as_deref().unwrap_or(base_print_no);
    return Some(format!(
        "{}{LBDC_BILL_QUERY}&SESSYR={}&QUERYDATA={print_no}",
        paths.lbdc_navigate, session.year
    ));
}

/// Agenda page on this system. An unset (non-positive) year gives an empty link.
fn local_agenda_url(paths: &Paths, key: &ContentKey) -> Option<String> {
    let ContentKey::Agenda { agenda_id, committee_id } = key else {
        return None;
    };
    if agenda_id.year <= 0 {
        return Some(String::new());
    }
    return Some(format!(
        "{}/agendas/{}/{}?comm={}",
        paths.context, agenda_id.year, agenda_id.number, committee_id.name
    ));
}

/// Bill page on this system, pinned to a version when the key has one.
fn local_bill_url(paths: &Paths, key: &ContentKey) -> Option<String> {
    let ContentKey::Bill { base_print_no, session, version, .. } = key else {
        return None;
    };
    let mut url = format!("{}/bills/{}/{base_print_no}", paths.context, session.year);
    if let Some(version) = version {
        url.push_str("?version=");
        url.push_str(version);
    }
    return Some(url);
}

/// Calendar page on this system, with a view matching the calendar type.
fn local_calendar_url(paths: &Paths, key: &ContentKey) -> Option<String> {
    let ContentKey::Calendar { cal_no, cal_type, year } = key else {
        return None;
    };
    let mut url = format!("{}/calendars/{year}/{cal_no}", paths.context);
    match cal_type {
        Some(CalendarType::ActiveList) => url.push_str("?view=active-list"),
        Some(CalendarType::FloorCalendar | CalendarType::SupplementalCalendar) => url.push_str("?view=floor"),
        Some(CalendarType::Other) | None => {},
    }
    return Some(url);
}

/// Bill or resolution page on NYSenate.gov.
fn senate_site_bill_url(paths: &Paths, key: &ContentKey) -> Option<String> {
    let ContentKey::Bill { base_print_no, print_no, session, version } = key else {
        return None;
    };
    let print_no = print_no.as_deref().unwrap_or(base_print_no);
    let bill_type = if is_bill_print_no(print_no) { "bills" } else { "resolutions" };
    let amendment = match version.as_deref() {
        None | Some("DEFAULT") => "original",
        Some(v) => v,
    };
    return Some(format!(
        "{}/legislation/{bill_type}/{}/{base_print_no}/amendment/{amendment}",
        paths.senate_site, session.year
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{AgendaId, CommitteeId, Session};

    fn paths() -> Paths {
        let mut paths = Config::default().paths;
        paths.context = "/openleg".to_string();
        return paths;
    }

    fn bill(print_no: &str, version: Option<&str>) -> ContentKey {
        return ContentKey::Bill {
            base_print_no: print_no.to_string(),
            print_no: Some(print_no.to_string()),
            session: Session { year: 2017 },
            version: version.map(str::to_string),
        };
    }

    fn calendar(cal_type: Option<CalendarType>) -> ContentKey {
        return ContentKey::Calendar { cal_no: 12, cal_type, year: 2017 };
    }

    fn agenda(year: i32) -> ContentKey {
        return ContentKey::Agenda {
            agenda_id: AgendaId { number: 5, year },
            committee_id: CommitteeId { name: "Finance".to_string() },
        };
    }

    #[test]
    fn senate_site_default_version_is_original() {
        let paths = paths();
        let url = UrlResolver::new(&paths).content_url(&bill("A1234", Some("DEFAULT")), "NYSENATE", "BILL").unwrap();
        assert_eq!(url, "https://www.nysenate.gov/legislation/bills/2017/A1234/amendment/original");
    }

    #[test]
    fn senate_site_version_used_verbatim() {
        let paths = paths();
        let url = UrlResolver::new(&paths).content_url(&bill("S1", Some("A")), "NYSENATE", "BILL").unwrap();
        assert!(url.ends_with("/legislation/bills/2017/S1/amendment/A"));
    }

    #[test]
    fn senate_site_bill_prefix_is_case_insensitive() {
        let paths = paths();
        let url = UrlResolver::new(&paths).content_url(&bill("s17", Some("B")), "NYSENATE", "BILL").unwrap();
        assert!(url.contains("/legislation/bills/"));
    }

    #[test]
    fn senate_site_non_bill_prefix_is_resolution() {
        let paths = paths();
        let url = UrlResolver::new(&paths).content_url(&bill("J350", Some("DEFAULT")), "NYSENATE", "BILL").unwrap();
        assert!(url.contains("/legislation/resolutions/2017/J350/amendment/original"));
    }

    #[test]
    fn senate_site_agenda_and_calendar_are_unsupported() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        assert_eq!(resolver.content_url(&agenda(2017), "NYSENATE", "AGENDA"), None);
        assert_eq!(resolver.content_url(&calendar(None), "NYSENATE", "CALENDAR"), None);
    }

    #[test]
    fn local_bill_version_only_when_present() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        assert_eq!(
            resolver.content_url(&bill("S1234", Some("A")), "LBDC", "BILL").unwrap(),
            "/openleg/bills/2017/S1234?version=A"
        );
        assert_eq!(resolver.content_url(&bill("S1234", None), "LBDC", "BILL").unwrap(), "/openleg/bills/2017/S1234");
    }

    #[test]
    fn local_calendar_views() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        let active = resolver.reference_url(&calendar(Some(CalendarType::ActiveList)), "NYSENATE", "CALENDAR");
        let floor = resolver.reference_url(&calendar(Some(CalendarType::FloorCalendar)), "NYSENATE", "CALENDAR");
        let supplemental =
            resolver.reference_url(&calendar(Some(CalendarType::SupplementalCalendar)), "NYSENATE", "CALENDAR");
        let plain = resolver.reference_url(&calendar(None), "NYSENATE", "CALENDAR").unwrap();

        assert!(active.unwrap().ends_with("?view=active-list"));
        assert!(floor.unwrap().ends_with("?view=floor"));
        assert!(supplemental.unwrap().ends_with("?view=floor"));
        assert_eq!(plain, "/openleg/calendars/2017/12");
        assert!(!plain.contains("view="));
    }

    #[test]
    fn local_agenda_urls() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        assert_eq!(resolver.content_url(&agenda(0), "LBDC", "AGENDA").unwrap(), "");
        let url = resolver.content_url(&agenda(2017), "LBDC", "AGENDA").unwrap();
        assert!(url.contains("2017/5?comm=Finance"));
    }

    #[test]
    fn nysenate_agenda_reference_is_local() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        assert_eq!(
            resolver.reference_url(&agenda(2017), "NYSENATE", "AGENDA").as_deref(),
            Some("/openleg/agendas/2017/5?comm=Finance")
        );
        assert_eq!(resolver.content_url(&agenda(2017), "NYSENATE", "AGENDA"), None);
    }

    #[test]
    fn lbdc_bill_reference() {
        let paths = paths();
        let url = UrlResolver::new(&paths).reference_url(&bill("S1234A", None), "LBDC", "BILL").unwrap();
        assert_eq!(
            url,
            "http://public.leginfo.state.ny.us/navigate.cgi?NVDTO:=&QUERYTYPE=BILLNO&CBTEXT=Y&CBSPONMEMO=Y&SESSYR=2017&QUERYDATA=S1234A"
        );
    }

    #[test]
    fn unregistered_pairs_yield_none() {
        let paths = paths();
        let resolver = UrlResolver::new(&paths);
        assert_eq!(resolver.reference_url(&agenda(2017), "LBDC", "AGENDA"), None);
        assert_eq!(resolver.reference_url(&calendar(None), "LBDC", "CALENDAR"), None);
        assert_eq!(resolver.reference_url(&bill("S1", None), "OPENLEG", "BILL"), None);
        assert_eq!(resolver.content_url(&bill("S1", None), "LBDC", "LAW"), None);
    }

    #[test]
    fn key_of_wrong_variant_yields_none() {
        let paths = paths();
        assert_eq!(UrlResolver::new(&paths).content_url(&agenda(2017), "LBDC", "BILL"), None);
    }
}
