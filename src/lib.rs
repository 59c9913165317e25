//! Leaderboards for a pizza club.
//!
//! The engine turns a snapshot of restaurants and their rated visits into
//! ranked standings: overall and pizza-overall leaderboards, one per pizza
//! component and "other stuff" category, and cross-restaurant comparisons of
//! the same dish. See [`compute_standings`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use domain::{
    Category, DishLeaderboard, Leaderboard, LeaderboardEntry, Placement, RankedEntry,
    RatingRecord, Restaurant, StandingsData, Visit,
};
pub use error::{Result, StandingsError};
pub use services::engine::{
    compute_standings, entries_for, leaderboard_for, placements_for, same_named_dishes_for,
};
