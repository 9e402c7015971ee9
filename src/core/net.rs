// src/core/net.rs

// Blocking GET over reqwest (rustls). One client per process, built on first use.

use std::{error::Error, sync::OnceLock, time::Duration};

use reqwest::{blocking::Client, header::ACCEPT, Url};

use crate::config::consts::{NET_TIMEOUT_SECS, USER_AGENT};

fn client() -> Result<&'static Client, Box<dyn Error>> {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    if let Some(c) = CLIENT.get() {
        return Ok(c);
    }
    let built = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(NET_TIMEOUT_SECS))
        .build()?;
    Ok(CLIENT.get_or_init(|| built))
}

/// Bare hosts get `https://`. Only http(s) URLs with a host are accepted.
pub fn normalize_url(url: &str) -> Result<Url, Box<dyn Error>> {
    let t = url.trim();
    let full = if t.contains("://") { s!(t) } else { join!("https://", t) };
    let parsed = Url::parse(&full)?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        other => Err(format!("Unsupported URL scheme '{other}': {t}").into()),
    }
}

pub fn http_get(url: &str) -> Result<String, Box<dyn Error>> {
    let url = normalize_url(url)?;
    let resp = client()?
        .get(url.clone())
        .header(ACCEPT, "application/json, text/html")
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP error: {status} {url}").into());
    }
    Ok(resp.text()?)
}
