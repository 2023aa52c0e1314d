use super::models::*;
use crate::error::ClientError;
use async_trait::async_trait;

/// The three configuration calls a synchronization pass needs from the server.
#[async_trait]
pub trait DnsConfigApi {
    async fn get_hosts(&self) -> Result<Vec<HostEntry>, ClientError>;
    async fn get_cnames(&self) -> Result<Vec<CnameEntry>, ClientError>;
    /// Replaces both lists on the server in one request.
    async fn patch_dns(
        &self,
        hosts: &[HostEntry],
        cnames: &[CnameEntry],
    ) -> Result<(), ClientError>;
}
