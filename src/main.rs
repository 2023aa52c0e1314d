use anyhow::{Context, Result};
use log::{error, info};
use piholedns::{
    api::PiholeClient,
    cache::FlatCache,
    config::{Config, ZoneConfig},
    plan::Plan,
    provider::PiholeProvider,
    zone::Zone,
};

async fn sync_zone(
    provider: &PiholeProvider<PiholeClient>,
    zone_config: &ZoneConfig,
    dry_run: bool,
) -> Result<()> {
    let desired = zone_config
        .desired_zone()
        .with_context(|| format!("Invalid records for zone {}", zone_config.name))?;
    let desired = provider.process_desired_zone(&desired);

    // One cache per zone pass; it is only valid until the apply below.
    let mut cache = FlatCache::new();
    let mut existing = Zone::new(desired.name.clone());
    let exists = provider
        .populate(&mut cache, &mut existing, zone_config.lenient)
        .await?;

    let plan = Plan::new(&existing, &desired, exists);
    if plan.is_empty() {
        info!("{}: no changes", plan.zone);
        return Ok(());
    }

    for change in &plan.changes {
        info!("{}: {}", plan.zone, change);
    }

    if dry_run {
        info!("{}: dry run, {} changes not applied", plan.zone, plan.changes.len());
        return Ok(());
    }

    let applied = provider.apply(&mut cache, &plan).await?;
    info!("{}: applied {} changes", plan.zone, applied);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_file)?;

    let client = PiholeClient::new(
        &config.pihole.url,
        config.pihole.password.clone(),
        config.pihole.totp,
        config.pihole.tls_verify,
    )?;
    let provider = PiholeProvider::new("pihole", client);

    for zone in &config.zones {
        info!("Synchronizing zone: {}", zone.name);
        if let Err(e) = sync_zone(&provider, zone, config.dry_run).await {
            error!("Failed to synchronize zone {}: {:#}", zone.name, e);
            return Err(e);
        }
    }
    Ok(())
}
