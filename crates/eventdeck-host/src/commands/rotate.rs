//! Runs a team or gallery carousel in the terminal.

use std::time::Duration;

use eventdeck_core::{CarouselSnapshot, Direction, Photo};
use tracing::{info, warn};

use super::team::member_line;
use crate::config::SiteConfig;
use crate::driver::CarouselDriver;
use crate::error::{HostError, HostResult};

/// Rotates the team of `year` (or the gallery) and prints `count` transitions.
///
/// Ctrl-C stops early.
pub async fn rotate(
    config: &SiteConfig,
    year: Option<&str>,
    gallery: bool,
    count: usize,
    interval_ms: Option<u64>,
) -> HostResult<()> {
    let interval = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.carousel_interval());
    if interval.is_zero() {
        return Err(HostError::config(
            "carousel interval must be greater than zero",
        ));
    }

    if gallery {
        println!("Gallery ({} photos)", config.gallery.len());
        run_carousel(config.gallery.clone(), interval, count, photo_line).await
    } else {
        let (year, members) = config.team_year(year)?;
        println!("Team {year} ({} members)", members.len());
        run_carousel(members.to_vec(), interval, count, member_line).await
    }
}

async fn run_carousel<T, F>(
    items: Vec<T>,
    interval: Duration,
    count: usize,
    label: F,
) -> HostResult<()>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> String,
{
    if items.is_empty() {
        println!("Nothing to rotate.");
        return Ok(());
    }

    let driver = CarouselDriver::new(items, interval);
    let handle = driver.handle();
    let mut rx = handle.subscribe();
    let task = tokio::spawn(driver.run());

    let first = rx.borrow_and_update().clone();
    println!("{}", render_slide(&first, &label));

    let mut shown = 0;
    while shown < count {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                println!("{}", render_slide(&snapshot, &label));
                shown += 1;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    handle.stop().await?;
    if let Err(err) = task.await {
        warn!(error = %err, "Carousel task failed");
    }
    Ok(())
}

pub fn photo_line(photo: &Photo) -> String {
    match &photo.caption {
        Some(caption) => format!("#{} {} - {}", photo.id, photo.image, caption),
        None => format!("#{} {}", photo.id, photo.image),
    }
}

/// One line per carousel state: position, direction and the active item.
pub fn render_slide<T>(snapshot: &CarouselSnapshot<T>, label: impl Fn(&T) -> String) -> String {
    let Some(item) = snapshot.active.as_ref() else {
        return "(empty)".to_string();
    };
    let arrow = match snapshot.direction {
        Direction::Forward => ">",
        Direction::Backward => "<",
    };
    let mut line = format!(
        "{arrow} [{}/{}] {}",
        snapshot.active_index + 1,
        snapshot.len,
        label(item)
    );
    if snapshot.paused {
        line.push_str(" (paused)");
    }
    line
}
