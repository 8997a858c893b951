use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base address, fixed at startup. Never derived from request headers.
    pub api_base: String,
    pub listen_addr: String,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("CHASER_API_BASE").ok(),
            std::env::var("LISTEN_ADDR").ok(),
            std::env::var("BACKEND_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(
        api_base: Option<String>,
        listen_addr: Option<String>,
        timeout: Option<String>,
    ) -> Result<Self> {
        let listen_addr = listen_addr.unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());

        let api_base = match api_base.as_deref().map(str::trim) {
            None | Some("") => same_origin_base(&listen_addr)?,
            Some(base) => normalize_base(base)?,
        };

        let backend_timeout = match timeout {
            Some(secs) => secs
                .trim()
                .parse()
                .with_context(|| format!("BACKEND_TIMEOUT_SECS is not a number: {secs}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base,
            listen_addr,
            backend_timeout: Duration::from_secs(backend_timeout),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3000".into(),
            listen_addr: DEFAULT_LISTEN_ADDR.into(),
            backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// The dashboard's own origin, used when no backend base is configured.
/// Wildcard listen addresses map to loopback.
fn same_origin_base(listen_addr: &str) -> Result<String> {
    let origin = match listen_addr.parse::<SocketAddr>() {
        Ok(mut addr) => {
            if addr.ip().is_unspecified() {
                addr.set_ip(match addr.ip() {
                    IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                    IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
                });
            }
            format!("http://{}", addr)
        }
        Err(_) => format!("http://{}", listen_addr),
    };
    normalize_base(&origin)
        .with_context(|| format!("cannot derive a backend address from LISTEN_ADDR {listen_addr:?}"))
}

/// Validates a base address and strips trailing slashes so paths can be appended.
pub fn normalize_base(base: &str) -> Result<String> {
    let url = Url::parse(base).with_context(|| format!("invalid backend address {base:?}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("backend address {base:?} cannot be used as a base");
    }
    Ok(base.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_base_is_the_dashboard_origin() {
        let config = Config::from_vars(None, None, None).unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:3000");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.backend_timeout, Duration::from_secs(10));

        let config = Config::from_vars(Some("  ".into()), Some("[::]:8080".into()), None).unwrap();
        assert_eq!(config.api_base, "http://[::1]:8080");

        let config = Config::from_vars(None, Some("10.0.0.5:3000".into()), None).unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:3000");

        let config = Config::from_vars(None, Some("localhost:3000".into()), None).unwrap();
        assert_eq!(config.api_base, "http://localhost:3000");
    }

    #[test]
    fn fixed_base_is_normalized() {
        let config = Config::from_vars(
            Some("http://backend:8000/".into()),
            Some("127.0.0.1:8080".into()),
            Some("3".into()),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://backend:8000");
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_vars(Some("not a url".into()), None, None).is_err());
        assert!(Config::from_vars(Some("mailto:someone@example.com".into()), None, None).is_err());
        assert!(Config::from_vars(None, None, Some("soon".into())).is_err());
    }
}
