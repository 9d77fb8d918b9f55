use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_BASE_URL_ENV: &str = "ASURA_API_BASE_URL";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_create_database")]
    pub create_database: bool,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// seconds, chapter image lists take longer to come back
    #[serde(default = "default_chapter_timeout")]
    pub chapter_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: asura_home().join("config.yml"),
            port: default_port(),
            database_path: default_database_path(),
            create_database: default_create_database(),
            api_base_url: default_api_base_url(),
            request_timeout: default_request_timeout(),
            chapter_timeout: default_chapter_timeout(),
        }
    }
}

fn asura_home() -> PathBuf {
    match std::env::var("ASURA_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".asura"),
    }
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    let path = asura_home();
    if !path.exists() {
        let _ = std::fs::create_dir_all(&path);
    }
    path.join("asura.db").display().to_string()
}

fn default_create_database() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://asura-ten.vercel.app/api".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_chapter_timeout() -> u64 {
    30
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => asura_home().join("config.yml"),
        };

        let mut cfg = match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                cfg
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                cfg
            }
        };

        if let Ok(api_base_url) = std::env::var(API_BASE_URL_ENV) {
            debug!("api base url overridden by {API_BASE_URL_ENV}");
            cfg.api_base_url = api_base_url;
        }

        Ok(cfg)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
