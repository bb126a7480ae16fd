//! Team roster command.

use eventdeck_core::Member;

use crate::config::SiteConfig;
use crate::error::HostResult;

/// Prints the team for `year`, or the default year.
pub fn team(config: &SiteConfig, year: Option<&str>) -> HostResult<()> {
    let (year, members) = config.team_year(year)?;
    println!("{}", render_team(year, members));
    Ok(())
}

pub fn member_line(member: &Member) -> String {
    format!(
        "{} {} - {}, {}",
        member.initials(),
        member.name,
        member.role,
        member.dept
    )
}

pub fn render_team(year: &str, members: &[Member]) -> String {
    let mut out = format!("Team {year} ({} members)", members.len());
    for member in members {
        out.push('\n');
        out.push_str(&member_line(member));
    }
    out
}
