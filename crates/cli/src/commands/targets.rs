use anyhow::Result;
use tom_catalog_core::{NewTarget, TargetId, parse_dec, parse_ra};
use tom_catalog_service::TargetService;

use crate::print_json;

pub(crate) async fn run_add(
    service: &TargetService,
    name: String,
    ra: &str,
    dec: &str,
    aliases: Vec<String>,
    unchecked: bool,
) -> Result<()> {
    let target = NewTarget { aliases, ..NewTarget::sidereal(name, parse_ra(ra)?, parse_dec(dec)?) };
    let saved = if unchecked {
        service.create_unchecked(target).await?
    } else {
        service.create(target).await?
    };
    print_json(&saved)
}

pub(crate) async fn run_alias(service: &TargetService, target_id: i64, name: &str) -> Result<()> {
    let alias = service.add_alias(TargetId(target_id), name).await?;
    print_json(&alias)
}

pub(crate) async fn run_get(service: &TargetService, id: i64) -> Result<()> {
    print_json(&service.get(TargetId(id)).await?)
}

pub(crate) async fn run_list(service: &TargetService, offset: usize, limit: usize) -> Result<()> {
    print_json(&service.list(offset, limit).await?)
}
