use crate::api::DnsConfigApi;
use crate::cache::FlatCache;
use crate::error::Result;
use crate::plan::Plan;
use crate::translate::{expand_change, translate_to_records};
use crate::zone::{Record, Zone, DEFAULT_TTL};
use log::{debug, info, warn};

/// Reads zones out of, and writes changes back into, a Pi-hole's local DNS
/// lists.
///
/// The provider holds no list state of its own: every pass borrows a
/// [`FlatCache`] for its populate/apply pair.
pub struct PiholeProvider<C> {
    id: String,
    client: C,
}

impl<C> PiholeProvider<C>
where
    C: DnsConfigApi + Sync,
{
    pub fn new(id: impl Into<String>, client: C) -> Self {
        let id = id.into();
        debug!("PiholeProvider::new: id={}", id);
        Self { id, client }
    }

    /// Resets every desired TTL to [`DEFAULT_TTL`] so TTLs coming from the
    /// source never show up as changes.
    pub fn process_desired_zone(&self, desired: &Zone) -> Zone {
        let mut processed = Zone::new(desired.name.clone());
        for record in desired.records() {
            let record = Record {
                ttl: DEFAULT_TTL,
                ..record.clone()
            };
            processed.upsert_record(record);
        }
        processed
    }

    /// Fetches both lists into `cache` and adds the records found under
    /// `zone`. Returns whether the zone has anything on the server. On error
    /// `zone` is left untouched.
    pub async fn populate(
        &self,
        cache: &mut FlatCache,
        zone: &mut Zone,
        lenient: bool,
    ) -> Result<bool> {
        debug!(
            "populate: id={}, name={}, lenient={}",
            self.id, zone.name, lenient
        );

        let hosts = cache.fetch_hosts(&self.client).await?;
        let cnames = cache.fetch_cnames(&self.client).await?;
        let translated = translate_to_records(&zone.name, &hosts, &cnames, lenient)?;

        let before = zone.len();
        let mut staged = zone.clone();
        for record in translated.records {
            staged.add_record(record, false)?;
        }
        *zone = staged;

        let exists = translated.names > 0;
        info!(
            "populate: found {} records, exists={}",
            zone.len() - before,
            exists
        );
        Ok(exists)
    }

    /// Applies every change of `plan` to `cache`, then commits once. If the
    /// commit fails the cache is rolled back to its state before the call.
    pub async fn apply(&self, cache: &mut FlatCache, plan: &Plan) -> Result<usize> {
        debug!(
            "apply: zone={}, len(changes)={}",
            plan.zone,
            plan.changes.len()
        );

        if plan.is_empty() {
            return Ok(0);
        }

        let snapshot = cache.clone();
        for change in &plan.changes {
            debug!("apply: {}", change);
            for mutation in expand_change(&plan.zone, change) {
                cache.apply_mutation(&mutation);
            }
        }

        info!("apply: sending changes to Pi-hole");
        if let Err(e) = cache.commit(&self.client).await {
            warn!("apply: commit failed, restoring cache: {}", e);
            *cache = snapshot;
            return Err(e.into());
        }

        Ok(plan.changes.len())
    }
}
