pub mod recommender;
pub mod scoring;

pub use recommender::RecommendationService;
