use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub environment: Environment,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let environment = match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".into())
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;

        // Falls back to a file-backed store next to the binary; the file is
        // created on first connect.
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bookings.db".into());

        let session_secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == Environment::Production => {
                anyhow::bail!("SESSION_SECRET must be set in production")
            }
            _ => {
                tracing::warn!(
                    "SESSION_SECRET not set; using a random per-process secret, \
                     sessions will not survive a restart"
                );
                Uuid::new_v4().simple().to_string()
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            session_secret,
            environment,
        })
    }
}
