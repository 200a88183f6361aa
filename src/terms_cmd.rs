use anyhow::Result;

use manse_resolve::CalendarResolver;
use manse_upstream::HttpClient;

use crate::cli::TermsArgs;
use crate::convert;

/// Run the `terms` subcommand.
pub fn run(args: TermsArgs) -> Result<()> {
    let config = convert::load_config(&args.config)?;
    let client = HttpClient::new(convert::build_client_config(&config));
    let resolver = CalendarResolver::new(client, convert::build_resolver_config(&config))?;

    let records = resolver.solar_terms_for_year(args.year)?;
    for record in &records {
        let local = record.local_civil();
        println!(
            "{:04}-{:02}-{:02} {:02}:{:02} KST  {:>3}\u{b0}  {} ({})",
            local.year,
            local.month,
            local.day,
            local.hour,
            local.minute,
            record.longitude_degrees,
            record.term,
            record.term.korean_name(),
        );
    }
    Ok(())
}
