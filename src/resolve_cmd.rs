use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use tracing::info;

use manse_resolve::{CalendarResolver, ResolutionRequest};
use manse_tables::{LunarDate, SolarDate};
use manse_upstream::HttpClient;

use crate::cli::{Direction, ResolveArgs};
use crate::convert;

/// Run the `resolve` subcommand.
pub fn run(args: ResolveArgs) -> Result<()> {
    let config = convert::load_config(&args.config)?;
    let client = HttpClient::new(convert::build_client_config(&config));
    let resolver = CalendarResolver::new(client, convert::build_resolver_config(&config))?;

    let (year, month, day) = convert::parse_date(&args.date)?;
    let request = match args.direction {
        Direction::SolarToLunar => {
            if args.leap {
                bail!("--leap only applies to lunar-to-solar conversions");
            }
            ResolutionRequest::SolarToLunar(SolarDate::new(year, month, day)?)
        }
        Direction::LunarToSolar => {
            ResolutionRequest::LunarToSolar(LunarDate::new(year, month, day, args.leap)?)
        }
    };

    let record = match args.deadline_ms {
        Some(ms) => resolver.resolve_by(request, Instant::now() + Duration::from_millis(ms))?,
        None => resolver.resolve(request)?,
    };
    println!("{record}");

    let report = resolver.health_report();
    info!(
        status = %report.snapshot.status,
        breaker = %report.breaker.state,
        "upstream health after resolution"
    );
    Ok(())
}
