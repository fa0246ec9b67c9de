use std::env;
use tracing::warn;

pub const DEFAULT_DAILY_CAPACITY: usize = 8;
pub const DEFAULT_SEARCH_HORIZON_DAYS: i64 = 14;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub booking: SlotSearchConfig,
}

/// Tunables for the next-available-slot search. The daily capacity is a
/// coarse per-day booking ceiling, not a per-hour check.
#[derive(Debug, Clone, Copy)]
pub struct SlotSearchConfig {
    pub daily_capacity: usize,
    pub search_horizon_days: i64,
}

impl Default for SlotSearchConfig {
    fn default() -> Self {
        Self {
            daily_capacity: DEFAULT_DAILY_CAPACITY,
            search_horizon_days: DEFAULT_SEARCH_HORIZON_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            booking: SlotSearchConfig {
                daily_capacity: env::var("BOOKING_DAILY_CAPACITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_DAILY_CAPACITY),
                search_horizon_days: env::var("BOOKING_SEARCH_HORIZON_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SEARCH_HORIZON_DAYS),
            },
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }
}
