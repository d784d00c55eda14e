use std::env;
use std::time::Duration;

use ini::Ini;

const DEFAULT_CACHE_MINUTES: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub cache_minutes: u64,
    pub skip_malformed_rows: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.ini".into());
        Self::from_ini_file(&path)
    }

    // 配置读取永远不报错，缺文件、缺节、缺键一律用默认值
    pub fn from_ini_file(path: &str) -> Self {
        let file = Ini::load_from_file(path).unwrap_or_else(|_| Ini::new());
        let get = |section: &str, key: &str| -> String {
            file.section(Some(section))
                .and_then(|s| s.get(key))
                .unwrap_or_default()
                .to_string()
        };

        Config {
            username: get("user", "name"),
            password: get("user", "password"),
            cache_minutes: get("server", "cache")
                .parse()
                .unwrap_or(DEFAULT_CACHE_MINUTES),
            skip_malformed_rows: get("server", "skip_malformed").parse().unwrap_or(false),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    pub fn cache_window(&self) -> Duration {
        Duration::from_secs(self.cache_minutes * 60)
    }
}
