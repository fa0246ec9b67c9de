pub mod reports;
pub mod summary;

pub use summary::AnalyticsService;
