use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub staging_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let staging_ttl_minutes = parse_ttl(env::var("BOOKING_STAGING_TTL_MINUTES").ok());
        Ok(Self {
            port,
            database_url,
            host,
            staging_ttl_minutes,
        })
    }
}

const DEFAULT_STAGING_TTL_MINUTES: i64 = 30;
/// One week.
const MAX_STAGING_TTL_MINUTES: i64 = 7 * 24 * 60;

fn parse_ttl(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|minutes| (1..=MAX_STAGING_TTL_MINUTES).contains(minutes))
        .unwrap_or(DEFAULT_STAGING_TTL_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::{MAX_STAGING_TTL_MINUTES, parse_ttl};

    #[test]
    fn staging_ttl_falls_back_to_thirty_minutes() {
        assert_eq!(parse_ttl(None), 30);
        assert_eq!(parse_ttl(Some("abc".into())), 30);
        assert_eq!(parse_ttl(Some("0".into())), 30);
        assert_eq!(parse_ttl(Some("45".into())), 45);
    }

    #[test]
    fn staging_ttl_above_one_week_uses_default() {
        assert_eq!(
            parse_ttl(Some(MAX_STAGING_TTL_MINUTES.to_string())),
            MAX_STAGING_TTL_MINUTES
        );
        assert_eq!(parse_ttl(Some((MAX_STAGING_TTL_MINUTES + 1).to_string())), 30);
        assert_eq!(parse_ttl(Some(i64::MAX.to_string())), 30);
    }
}
