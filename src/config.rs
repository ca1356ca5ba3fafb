use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_ttl_days: i64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub seed_catalog: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_ttl_days = env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30);
        let admin_username = env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        let seed_catalog = env::var("SEED_CATALOG")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        Ok(Self {
            host,
            port,
            session_ttl_days,
            admin_username,
            admin_password,
            seed_catalog,
        })
    }
}
