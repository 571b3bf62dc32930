use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::net::{IpAddr, SocketAddr};

use crate::services::chart::ChartType;

fn default_max_payload_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

/// Defaults shared by session initialisation and every reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewDefaults {
    pub rows_per_page_options: &'static [usize],
    pub rows_per_page: usize,
    pub chart_type: ChartType,
    pub palette: &'static str,
    pub opacity: f64,
    pub show_legend: bool,
    pub show_grid: bool,
}

impl ViewDefaults {
    pub const STANDARD: ViewDefaults = ViewDefaults {
        rows_per_page_options: &[5, 10, 25, 50],
        rows_per_page: 10,
        chart_type: ChartType::Bar,
        palette: "Default",
        opacity: 0.8,
        show_legend: true,
        show_grid: true,
    };

    pub fn allows_rows_per_page(&self, rows_per_page: usize) -> bool {
        self.rows_per_page_options.contains(&rows_per_page)
    }
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_payload_size: usize,
    pub log_filter: String,
    pub view: ViewDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            max_payload_size: default_max_payload_size(),
            log_filter: "info".to_string(),
            view: ViewDefaults::STANDARD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("DASHBOARD_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("DASHBOARD_HOST is not an IP address: {}", host))?;
        }
        if let Some(port) = lookup("DASHBOARD_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("DASHBOARD_PORT is not a port number: {}", port))?;
        }
        if let Some(size) = lookup("DASHBOARD_MAX_PAYLOAD_BYTES") {
            config.max_payload_size = size
                .parse()
                .with_context(|| format!("DASHBOARD_MAX_PAYLOAD_BYTES is not a size: {}", size))?;
        }
        if let Some(filter) = lookup("DASHBOARD_LOG") {
            config.log_filter = filter;
        }
        if let Some(rows) = lookup("DASHBOARD_ROWS_PER_PAGE") {
            let rows: usize = rows
                .parse()
                .with_context(|| format!("DASHBOARD_ROWS_PER_PAGE is not a number: {}", rows))?;
            if !config.view.allows_rows_per_page(rows) {
                bail!(
                    "DASHBOARD_ROWS_PER_PAGE must be one of {:?}, got {}",
                    config.view.rows_per_page_options,
                    rows
                );
            }
            config.view.rows_per_page = rows;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn load_config() -> Result<Config> {
    Config::from_env()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_payload_size, 10 * 1024 * 1024);
        assert_eq!(config.view, ViewDefaults::STANDARD);
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("DASHBOARD_HOST", "0.0.0.0"),
            ("DASHBOARD_PORT", "8080"),
            ("DASHBOARD_ROWS_PER_PAGE", "25"),
            ("DASHBOARD_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.view.rows_per_page, 25);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rows_per_page_outside_options_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DASHBOARD_ROWS_PER_PAGE", "7")]))
            .unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("DASHBOARD_PORT", "http")])).is_err());
    }
}
