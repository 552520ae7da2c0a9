use std::net::IpAddr;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

pub mod dto;
pub mod endpoint;
pub mod router;
pub mod samples;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utilities;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub rest_pki_url: String,
    /// API access token issued on the REST PKI management panel.
    pub access_token: String,
    pub server_ip: Option<IpAddr>,
    pub server_port: Option<u16>,
    /// Directory where signed documents are kept for download.
    pub app_data_dir: PathBuf,
    pub trace_json: Option<bool>,
    pub trace_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rest_pki_url: "https://pki.rest/".to_string(),
            access_token: String::new(),
            server_ip: None,
            server_port: None,
            app_data_dir: "app-data".into(),
            trace_json: None,
            trace_level: None,
        }
    }
}

impl ServerConfig {
    /// Later files override earlier ones; `SAMPLE_SERVER__`-prefixed
    /// environment variables override everything.
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        for path in files {
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed("SAMPLE_SERVER__").split("__").lowercase(false))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_files_merge_in_order() {
        let base = tempfile::NamedTempFile::with_suffix(".yml").unwrap();
        std::fs::write(
            base.path(),
            "accessToken: base-token\nserverPort: 8080\n",
        )
        .unwrap();

        let overlay = tempfile::NamedTempFile::with_suffix(".yml").unwrap();
        std::fs::write(overlay.path(), "accessToken: overlay-token\n").unwrap();

        let config = ServerConfig::from_files(&[base.path(), overlay.path()]).unwrap();

        assert_eq!(config.access_token, "overlay-token");
        assert_eq!(config.server_port, Some(8080));
        assert_eq!(config.rest_pki_url, "https://pki.rest/");
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let config = ServerConfig::from_files(&["does-not-exist.yml"]).unwrap();

        assert!(config.access_token.is_empty());
        assert_eq!(config.app_data_dir, PathBuf::from("app-data"));
    }
}
