use anyhow::Result;
use tom_catalog_core::{parse_dec, parse_ra};
use tom_catalog_service::{MatchManagerRegistry, TargetService};

use crate::print_json;

pub(crate) async fn run_match(service: &TargetService, name: &str, exact: bool) -> Result<()> {
    let matches = service.match_name(name, exact).await?;
    print_json(&matches)
}

/// `ra`/`dec` accept decimal degrees or sexagesimal.
pub(crate) async fn run_cone(service: &TargetService, ra: &str, dec: &str, radius: f64) -> Result<()> {
    let matches = service.cone_search(parse_ra(ra)?, parse_dec(dec)?, radius).await?;
    print_json(&matches)
}

pub(crate) async fn run_stats(service: &TargetService) -> Result<()> {
    print_json(&service.stats().await?)
}

pub(crate) fn run_managers() -> Result<()> {
    for name in MatchManagerRegistry::with_builtins().names() {
        println!("{name}");
    }
    Ok(())
}
