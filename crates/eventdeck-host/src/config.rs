//! Site configuration.
//!
//! Events, team rosters and gallery photos live in a single `site.toml`,
//! at `~/.config/eventdeck/site.toml` by default. When that file does not
//! exist the site bundled with the binary is used.
//!
//! ```toml
//! [carousel]
//! interval_ms = 3000
//!
//! [[events]]
//! id = 1
//! title = "Zenix"
//! date = "Mar 5-6, 2026"
//! time = "9:00 AM"
//! status = "upcoming"
//!
//! [[team.2026]]
//! name = "G. Akshitha"
//! role = "President"
//! dept = "Tech"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use eventdeck_core::{Event, EventCatalog, Member, Photo, Roster};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HostError, HostResult};

/// The site shipped with the binary.
pub const BUILTIN_SITE: &str = include_str!("../site.toml");

/// Configuration for an eventdeck site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Debug mode.
    pub debug: bool,

    /// Carousel settings.
    pub carousel: CarouselSettings,

    /// Reference clock settings.
    pub clock: ClockSettings,

    /// Listed events, in display order.
    pub events: Vec<Event>,

    /// Team members by year.
    pub team: Roster,

    /// Gallery photos, in display order.
    pub gallery: Vec<Photo>,
}

/// Carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,

    /// Team year shown first; the latest year when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_year: Option<String>,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            default_year: None,
        }
    }
}

/// Reference clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// How often live status is recomputed, in seconds.
    pub refresh_secs: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self { refresh_secs: 30 }
    }
}

impl SiteConfig {
    /// Loads the site from the default path, or the bundled site if there is none.
    pub fn load() -> HostResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "no site file, using bundled site");
            Self::builtin()
        }
    }

    /// Loads the site from a specific path.
    pub fn load_from(path: &Path) -> HostResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from TOML text.
    pub fn from_toml_str(content: &str) -> HostResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The site bundled with the binary.
    pub fn builtin() -> HostResult<Self> {
        Self::from_toml_str(BUILTIN_SITE)
    }

    /// Renders the site as TOML.
    pub fn to_toml_string(&self) -> HostResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the default site file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("site.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventdeck")
    }

    /// Builder: set the carousel period.
    pub fn with_carousel_interval(mut self, interval: Duration) -> Self {
        self.carousel.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Builder: set the events.
    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Builder: set the team roster.
    pub fn with_team(mut self, team: Roster) -> Self {
        self.team = team;
        self
    }

    /// The events as a catalog.
    pub fn catalog(&self) -> EventCatalog {
        EventCatalog::new(self.events.clone())
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.interval_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.clock.refresh_secs)
    }

    /// Resolves which team year to show and its members.
    ///
    /// Uses `requested` if given, then the configured default year, then the
    /// latest year in the roster.
    pub fn team_year<'a>(&'a self, requested: Option<&'a str>) -> HostResult<(&'a str, &'a [Member])> {
        let year = requested
            .or(self.carousel.default_year.as_deref())
            .or_else(|| self.team.latest_year())
            .ok_or_else(|| HostError::config("the site has no team roster"))?;
        let members = self
            .team
            .members(year)
            .ok_or_else(|| HostError::unknown_year(year))?;
        Ok((year, members))
    }

    /// Lists everything that looks wrong with the site.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.carousel.interval_ms == 0 {
            problems.push("carousel.interval_ms must be greater than zero".to_string());
        }
        if self.clock.refresh_secs == 0 {
            problems.push("clock.refresh_secs must be greater than zero".to_string());
        }

        for id in self.catalog().duplicate_ids() {
            problems.push(format!("event id {id} is used more than once"));
        }

        for event in self.events.iter().filter(|e| e.is_upcoming()) {
            if let Err(err) = event.window() {
                problems.push(format!(
                    "upcoming event {} ({}) will never show as live: {err}",
                    event.id, event.title
                ));
            }
        }

        if let Some(year) = self.carousel.default_year.as_deref()
            && self.team.members(year).is_none()
        {
            problems.push(format!("carousel.default_year {year} is not in the team roster"));
        }
        for year in self.team.empty_years() {
            problems.push(format!("team year {year} has no members"));
        }

        problems
    }

    /// Fails with every problem found, if any.
    pub fn validate(&self) -> HostResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(HostError::config(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use eventdeck_core::EventStatus;

    #[test]
    fn default_config() {
        let config = SiteConfig::default();
        assert!(!config.debug);
        assert_eq!(config.carousel_interval(), Duration::from_millis(3000));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert!(config.events.is_empty());
        assert!(config.team.is_empty());
    }

    #[test]
    fn builtin_site_is_valid() {
        let config = SiteConfig::builtin().unwrap();
        assert!(!config.events.is_empty());
        assert!(!config.gallery.is_empty());
        assert_eq!(config.team.latest_year(), Some("2026"));
        assert_eq!(config.problems(), Vec::<String>::new());
    }

    #[test]
    fn parse_minimal_site() {
        let config = SiteConfig::from_toml_str(
            r#"
            [carousel]
            interval_ms = 1500

            [[events]]
            id = 1
            title = "Lunch talk"
            date = "28-02-2026"
            time = "11:30 AM"
            end_time = "12:30 PM"

            [[events]]
            id = 2
            title = "Meetup"
            date = "Aug 2024"
            time = ""
            status = "past"
            category = "meetup"

            [[team.2026]]
            name = "G. Akshitha"
            role = "President"
            dept = "Tech"
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel_interval(), Duration::from_millis(1500));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.events.len(), 2);
        assert_eq!(config.events[0].status, EventStatus::Upcoming);
        assert_eq!(config.events[0].schedule.end_time(), Some("12:30 PM"));
        assert_eq!(config.events[1].schedule.time(), None);
        assert_eq!(config.events[1].category.as_deref(), Some("meetup"));

        let (year, members) = config.team_year(None).unwrap();
        assert_eq!(year, "2026");
        assert_eq!(members[0].initials(), "GA");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\n[clock]\nrefresh_secs = 5").unwrap();

        let config = SiteConfig::load_from(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = SiteConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HostError::ConfigRead { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = SiteConfig::from_toml_str("events = 3").unwrap_err();
        assert!(matches!(err, HostError::ConfigParse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = SiteConfig::builtin().unwrap();
        let text = config.to_toml_string().unwrap();
        let parsed = SiteConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn team_year_resolution() {
        let team = Roster::new()
            .with_year("2024", vec![Member::new("Chaitanya", "President", "Tech")])
            .with_year("2026", vec![Member::new("G. Akshitha", "President", "Tech")]);
        let mut config = SiteConfig::default().with_team(team);

        assert_eq!(config.team_year(None).unwrap().0, "2026");
        assert_eq!(config.team_year(Some("2024")).unwrap().0, "2024");

        config.carousel.default_year = Some("2024".to_string());
        assert_eq!(config.team_year(None).unwrap().0, "2024");

        assert!(matches!(
            config.team_year(Some("1999")),
            Err(HostError::UnknownYear { .. })
        ));
        assert!(SiteConfig::default().team_year(None).is_err());
    }

    #[test]
    fn problems_are_reported() {
        let mut config = SiteConfig::default()
            .with_carousel_interval(Duration::ZERO)
            .with_events(vec![
                Event::new(1, "A", "28-02-2026"),
                Event::new(1, "B", "TBA"),
                Event::new(2, "C", "TBA").with_status(EventStatus::Past),
            ])
            .with_team(Roster::new().with_year("2023", Vec::new()));
        config.carousel.default_year = Some("2025".to_string());

        let problems = config.problems();
        assert_eq!(problems.len(), 5, "{problems:#?}");
        assert!(problems[0].contains("interval_ms"));
        assert!(problems[1].contains("event id 1"));
        assert!(problems[2].contains("upcoming event 1 (B)"));
        assert!(problems[3].contains("2025"));
        assert!(problems[4].contains("2023"));
        assert!(config.validate().is_err());
    }
}
