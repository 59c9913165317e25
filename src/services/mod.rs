pub mod collecting;
pub mod engine;
pub mod extraction;
pub mod matching;
pub mod normalizing;
pub mod ranking;
mod standings_service;

pub use standings_service::StandingsService;
