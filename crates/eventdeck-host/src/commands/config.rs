//! Configuration commands.

use std::path::Path;

use crate::config::SiteConfig;
use crate::error::{HostError, HostResult};

/// Dump the effective site to stdout.
pub fn dump(config: &SiteConfig, source: Option<&Path>) -> HostResult<()> {
    let toml_str = config.to_toml_string()?;
    println!(
        "# site.toml ({})",
        source_label(source, &SiteConfig::default_path())
    );
    println!("{}", toml_str);
    Ok(())
}

/// Where the loaded site came from: the given file, the default file, or
/// the bundled site when the default file does not exist.
fn source_label(source: Option<&Path>, default_path: &Path) -> String {
    match source {
        Some(path) => path.display().to_string(),
        None if default_path.exists() => default_path.display().to_string(),
        None => "bundled".to_string(),
    }
}

/// Validate the site and report every problem found.
pub fn validate(config: &SiteConfig) -> HostResult<()> {
    let problems = config.problems();
    if !problems.is_empty() {
        for problem in &problems {
            println!("- {problem}");
        }
        return Err(HostError::config(format!(
            "{} problem(s) found",
            problems.len()
        )));
    }

    println!("{}", summary(config));
    Ok(())
}

/// Show the site file path.
pub fn path() -> HostResult<()> {
    println!("site: {}", SiteConfig::default_path().display());
    Ok(())
}

fn summary(config: &SiteConfig) -> String {
    format!(
        "Site is valid: {} events, {} team years, {} photos.",
        config.events.len(),
        config.team.years().count(),
        config.gallery.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builtin_summary() {
        let config = SiteConfig::builtin().unwrap();
        assert!(validate(&config).is_ok());
        insta::assert_snapshot!(
            summary(&config),
            @"Site is valid: 6 events, 3 team years, 12 photos."
        );
    }

    #[test]
    fn dump_source_label() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("site.toml");
        assert_eq!(source_label(None, &missing), "bundled");

        std::fs::write(&missing, "").unwrap();
        assert_eq!(source_label(None, &missing), missing.display().to_string());

        let explicit = Path::new("/srv/site.toml");
        assert_eq!(source_label(Some(explicit), &missing), "/srv/site.toml");
    }

    #[test]
    fn invalid_site_fails() {
        let config = SiteConfig::default().with_carousel_interval(Duration::ZERO);
        let err = validate(&config).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: 1 problem(s) found");
    }
}
