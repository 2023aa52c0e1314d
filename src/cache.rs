use crate::api::{CnameEntry, DnsConfigApi, HostEntry};
use crate::error::ClientError;
use log::debug;

/// A single change to the flat lists, produced by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatMutation {
    AddHost(HostEntry),
    RemoveHost(HostEntry),
    AddCname(CnameEntry),
    RemoveCname(CnameEntry),
}

/// Working copy of the server's host and CNAME lists for one
/// synchronization session. Neither list ever holds a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatCache {
    hosts: Vec<HostEntry>,
    cnames: Vec<CnameEntry>,
}

impl FlatCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hosts(&self) -> &[HostEntry] {
        &self.hosts
    }

    pub fn cnames(&self) -> &[CnameEntry] {
        &self.cnames
    }

    /// Replaces the cached host list with the server's and returns a copy.
    pub async fn fetch_hosts<C>(&mut self, api: &C) -> Result<Vec<HostEntry>, ClientError>
    where
        C: DnsConfigApi + Sync + ?Sized,
    {
        let mut hosts = api.get_hosts().await?;
        dedup(&mut hosts);
        debug!("fetch_hosts: {} entries", hosts.len());

        self.hosts = hosts;
        Ok(self.hosts.clone())
    }

    /// Replaces the cached CNAME list with the server's and returns a copy.
    pub async fn fetch_cnames<C>(&mut self, api: &C) -> Result<Vec<CnameEntry>, ClientError>
    where
        C: DnsConfigApi + Sync + ?Sized,
    {
        let mut cnames = api.get_cnames().await?;
        dedup(&mut cnames);
        debug!("fetch_cnames: {} entries", cnames.len());

        self.cnames = cnames;
        Ok(self.cnames.clone())
    }

    pub fn add_host(&mut self, ip: &str, name: &str) {
        insert(&mut self.hosts, HostEntry::new(ip, name));
    }

    pub fn add_cname(&mut self, name: &str, target: &str) {
        insert(&mut self.cnames, CnameEntry::new(name, target));
    }

    pub fn remove_host(&mut self, ip: &str, name: &str) {
        let entry = HostEntry::new(ip, name);
        self.hosts.retain(|e| *e != entry);
    }

    pub fn remove_cname(&mut self, name: &str, target: &str) {
        let entry = CnameEntry::new(name, target);
        self.cnames.retain(|e| *e != entry);
    }

    pub fn apply_mutation(&mut self, mutation: &FlatMutation) {
        match mutation {
            FlatMutation::AddHost(e) => insert(&mut self.hosts, e.clone()),
            FlatMutation::RemoveHost(e) => self.hosts.retain(|x| x != e),
            FlatMutation::AddCname(e) => insert(&mut self.cnames, e.clone()),
            FlatMutation::RemoveCname(e) => self.cnames.retain(|x| x != e),
        }
    }

    /// Pushes both full lists to the server in a single request.
    pub async fn commit<C>(&self, api: &C) -> Result<(), ClientError>
    where
        C: DnsConfigApi + Sync + ?Sized,
    {
        debug!(
            "commit: hosts={}, cnames={}",
            self.hosts.len(),
            self.cnames.len()
        );
        api.patch_dns(&self.hosts, &self.cnames).await
    }
}

fn insert<T: PartialEq>(list: &mut Vec<T>, entry: T) {
    if !list.contains(&entry) {
        list.push(entry);
    }
}

// The server does not enforce uniqueness; keep the first occurrence.
fn dedup<T: PartialEq>(list: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(list.len());
    for entry in list.drain(..) {
        insert(&mut seen, entry);
    }
    *list = seen;
}
