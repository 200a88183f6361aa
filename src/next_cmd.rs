use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use manse_astro::{julian_day_to_unix_millis, to_julian_day};
use manse_resolve::CalendarResolver;
use manse_upstream::HttpClient;

use crate::cli::NextArgs;
use crate::convert;

/// Run the `next` subcommand.
pub fn run(args: NextArgs) -> Result<()> {
    let config = convert::load_config(&args.config)?;
    let client = HttpClient::new(convert::build_client_config(&config));
    let resolver = CalendarResolver::new(client, convert::build_resolver_config(&config))?;

    let millis = match &args.date {
        Some(date) => {
            let (year, month, day) = convert::parse_date(date)?;
            let (hour, minute) = convert::parse_time(&args.time)?;
            let jd = to_julian_day(
                year,
                month as i32,
                day as i32,
                hour as f64 + minute as f64 / 60.0,
            );
            julian_day_to_unix_millis(jd)
        }
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the Unix epoch")?
            .as_millis() as i64,
    };

    let current = resolver.nearest_solar_term(millis)?;
    let next = resolver.next_solar_term(millis)?;

    let local = current.local_civil();
    println!(
        "current: {} ({}) since {:04}-{:02}-{:02} {:02}:{:02} KST",
        current.term,
        current.term.korean_name(),
        local.year,
        local.month,
        local.day,
        local.hour,
        local.minute,
    );
    let local = next.local_civil();
    println!(
        "next:    {} ({}) at    {:04}-{:02}-{:02} {:02}:{:02} KST",
        next.term,
        next.term.korean_name(),
        local.year,
        local.month,
        local.day,
        local.hour,
        local.minute,
    );
    Ok(())
}
