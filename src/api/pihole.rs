use super::{client::DnsConfigApi, models::*};
use crate::error::ClientError;
use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Method, Response, StatusCode,
};
use serde::Serialize;
use tokio::sync::Mutex;

const AUTH_PATH: &str = "/api/auth";
const HOSTS_PATH: &str = "/api/config/dns/hosts";
const CNAMES_PATH: &str = "/api/config/dns/cnameRecords";
const CONFIG_PATH: &str = "/api/config";
const SID_HEADER: &str = "sid";
const USER_AGENT: &str = concat!("piholedns/", env!("CARGO_PKG_VERSION"));

/// Client for the Pi-hole v6 REST API.
///
/// A session is established lazily on the first request and reused after
/// that. A 401 on a reused session triggers exactly one re-authentication
/// and retry.
pub struct PiholeClient {
    client: reqwest::Client,
    base_url: String,
    password: String,
    totp: Option<u32>,
    sid: Mutex<Option<String>>,
}

#[async_trait]
impl DnsConfigApi for PiholeClient {
    async fn get_hosts(&self) -> Result<Vec<HostEntry>, ClientError> {
        let text = self.request(Method::GET, HOSTS_PATH, None::<&()>).await?;
        let parsed: ConfigEnvelope<HostsSection> = serde_json::from_str(&text).map_err(|e| {
            ClientError::UnexpectedResponse(format!("gathering hosts: {}", e))
        })?;

        Ok(parsed.config.dns.hosts)
    }

    async fn get_cnames(&self) -> Result<Vec<CnameEntry>, ClientError> {
        let text = self.request(Method::GET, CNAMES_PATH, None::<&()>).await?;
        let parsed: ConfigEnvelope<CnamesSection> = serde_json::from_str(&text).map_err(|e| {
            ClientError::UnexpectedResponse(format!("gathering CNAMEs: {}", e))
        })?;

        Ok(parsed.config.dns.cname_records)
    }

    async fn patch_dns(
        &self,
        hosts: &[HostEntry],
        cnames: &[CnameEntry],
    ) -> Result<(), ClientError> {
        let payload = ConfigEnvelope::new(DnsPatch {
            hosts,
            cname_records: cnames,
        });

        self.request(Method::PATCH, CONFIG_PATH, Some(&payload)).await?;
        Ok(())
    }
}

impl PiholeClient {
    pub fn new(
        url: &str,
        password: impl Into<String>,
        totp: Option<u32>,
        tls_verify: bool,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!tls_verify)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            password: password.into(),
            totp,
            sid: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logs in and returns a fresh session id.
    pub async fn authorize(&self) -> Result<String, ClientError> {
        debug!("authorize: url={}", self.base_url);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, AUTH_PATH))
            .json(&AuthRequest {
                password: &self.password,
                totp: self.totp,
            })
            .send()
            .await?;
        let text = check_status(response).await?.text().await?;

        let auth: AuthResponse = serde_json::from_str(&text).map_err(|_| {
            ClientError::UnexpectedResponse("unexpected authorization response".to_string())
        })?;

        let sid = auth.session.sid.ok_or_else(|| {
            ClientError::UnexpectedResponse("authorization response carries no sid".to_string())
        })?;
        debug!("authorize: session valid for {:?}s", auth.session.validity);

        Ok(sid)
    }

    /// Returns the current session id and whether it was just established.
    async fn session(&self) -> Result<(String, bool), ClientError> {
        let mut held = self.sid.lock().await;
        if let Some(sid) = held.as_ref() {
            return Ok((sid.clone(), false));
        }

        let sid = self.authorize().await?;
        *held = Some(sid.clone());
        Ok((sid, true))
    }

    async fn request<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ClientError> {
        let (sid, fresh) = self.session().await?;

        match self.send(method.clone(), path, body, &sid).await {
            Err(ClientError::Unauthorized) if !fresh => {
                debug!("request: session expired, re-authenticating");
                self.sid.lock().await.take();
                let (sid, _) = self.session().await?;
                self.send(method, path, body, &sid).await
            }
            other => other,
        }
    }

    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        sid: &str,
    ) -> Result<String, ClientError> {
        debug!("request: {} {}", method, path);

        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(SID_HEADER, sid);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(check_status(response).await?.text().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        status if status.is_success() => Ok(response),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
