use std::path::Path;

use crate::error::Error;

/// Default admin API base path.
const DEFAULT_ADMIN_API: &str = "/api/3/admin";
/// Default base for content hosted on this system.
const DEFAULT_CONTEXT: &str = "";
/// Default LBDC bill search endpoint.
const DEFAULT_LBDC_NAVIGATE: &str = "http://public.leginfo.state.ny.us/navigate.cgi";
/// Rendered height of one line of diff text.
const DEFAULT_LINE_HEIGHT: u32 = 20;
/// Default NYSenate.gov base.
const DEFAULT_SENATE_SITE: &str = "https://www.nysenate.gov";
/// Default origin the admin API is served from.
const DEFAULT_SERVER: &str = "http://localhost:8080";
/// Delay between an input change and the layout measurement.
const DEFAULT_SETTLE_MS: u64 = 100;

/// Project configuration loaded from `.spotcheck.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Diff view layout settings.
    pub diff: DiffSettings,
    /// Path prefixes for links and API calls.
    pub paths: Paths,
}

/// Layout settings for the mismatch diff view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSettings {
    /// Rendered height of a single line.
    pub line_height: u32,
    /// Milliseconds to wait before measuring a freshly rendered diff.
    pub settle_ms: u64,
    /// Whether preformatted diffs get a line number gutter.
    pub show_line_numbers: bool,
}

/// Path prefixes established by the hosting application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Base of the admin API (`adminApiPath`).
    pub admin_api: String,
    /// Base for content hosted on this system (`ctxPath`).
    pub context: String,
    /// LBDC bill search endpoint.
    pub lbdc_navigate: String,
    /// Base of NYSenate.gov (`senSitePath`).
    pub senate_site: String,
    /// Scheme, host, and port the admin API is reached at.
    pub server: String,
}

/// Raw TOML structure for `.spotcheck.toml`.
#[derive(serde::Deserialize, Default)]
struct SpotcheckTomlConfig {
    #[serde(default)]
    diff: RawDiff,
    #[serde(default)]
    paths: RawPaths,
}

/// Raw `[diff]` table. Every field is optional.
#[derive(serde::Deserialize, Default)]
struct RawDiff {
    line_height: Option<u32>,
    settle_ms: Option<u64>,
    show_line_numbers: Option<bool>,
}

/// Raw `[paths]` table. Every field is optional.
#[derive(serde::Deserialize, Default)]
struct RawPaths {
    admin_api: Option<String>,
    context: Option<String>,
    lbdc_navigate: Option<String>,
    senate_site: Option<String>,
    server: Option<String>,
}

impl Config {
    /// Build a config from a raw TOML document, filling gaps with defaults.
    fn from_raw(raw: SpotcheckTomlConfig) -> Self {
        let line_height = raw.diff.line_height.filter(|h| return *h > 0).unwrap_or(DEFAULT_LINE_HEIGHT);
        return Self {
            diff: DiffSettings {
                line_height,
                settle_ms: raw.diff.settle_ms.unwrap_or(DEFAULT_SETTLE_MS),
                show_line_numbers: raw.diff.show_line_numbers.unwrap_or(true),
            },
            paths: Paths {
                admin_api: trim_trailing_slash(raw.paths.admin_api.as_deref().unwrap_or(DEFAULT_ADMIN_API)),
                context: trim_trailing_slash(raw.paths.context.as_deref().unwrap_or(DEFAULT_CONTEXT)),
                lbdc_navigate: raw.paths.lbdc_navigate.unwrap_or_else(|| return DEFAULT_LBDC_NAVIGATE.to_string()),
                senate_site: trim_trailing_slash(raw.paths.senate_site.as_deref().unwrap_or(DEFAULT_SENATE_SITE)),
                server: trim_trailing_slash(raw.paths.server.as_deref().unwrap_or(DEFAULT_SERVER)),
            },
        };
    }

    /// Load config from `.spotcheck.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".spotcheck.toml");
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::from_raw(SpotcheckTomlConfig::default()));
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: SpotcheckTomlConfig = toml::from_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        return Ok(Self::from_raw(raw));
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self::from_raw(SpotcheckTomlConfig::default());
    }
}

/// Strip trailing slashes so prefixes can be joined with `/segment`.
fn trim_trailing_slash(prefix: &str) -> String {
    return prefix.trim_end_matches('/').to_string();
}
