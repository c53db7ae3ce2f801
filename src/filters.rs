//! Game screening: the ordered predicate chain applied before metrics.
//!
//! Filters are pure. They see the game behind a shared reference and must not
//! depend on corpus order; a chain result is the conjunction of its members,
//! so registration order only matters for how early a game is rejected.

use crate::core::{Category, Game, GameType};

pub trait Filter: Send + Sync {
    /// Registry/config name of this filter.
    fn name(&self) -> &str;

    /// Whether the game should proceed to analysis.
    fn accepts(&self, category: Category, game: &Game) -> bool;
}

/// Ordered conjunction of filters with short-circuit evaluation.
///
/// An empty chain accepts every game.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn with(mut self, filter: Box<dyn Filter>) -> Self {
        self.register(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn accepts(&self, category: Category, game: &Game) -> bool {
        for filter in &self.filters {
            if !filter.accepts(category, game) {
                log::debug!("filter '{}' rejected game", filter.name());
                return false;
            }
        }
        true
    }
}

/// Accepts games where both players carry a rating at or above a threshold.
pub struct RatedPlayersFilter {
    min_rating: u32,
}

impl RatedPlayersFilter {
    pub fn new(min_rating: u32) -> Self {
        Self { min_rating }
    }
}

impl Filter for RatedPlayersFilter {
    fn name(&self) -> &str {
        "rated-players"
    }

    fn accepts(&self, _category: Category, game: &Game) -> bool {
        let rated = |rating: Option<u32>| rating.is_some_and(|r| r >= self.min_rating);
        rated(game.white.rating) && rated(game.black.rating)
    }
}

/// Accepts only base-variant games, discarding expansion plays.
pub struct BaseGameFilter;

impl Filter for BaseGameFilter {
    fn name(&self) -> &str {
        "base-game"
    }

    fn accepts(&self, _category: Category, game: &Game) -> bool {
        game.game_type == GameType::Base
    }
}

/// Accepts games opened by placing the queen bee.
pub struct QueenOpeningFilter;

impl Filter for QueenOpeningFilter {
    fn name(&self) -> &str {
        "queen-opening"
    }

    fn accepts(&self, _category: Category, game: &Game) -> bool {
        game.opening_move().is_some_and(|m| m.token == "Q")
    }
}

/// Accepts games that ran to a decided result (win or draw).
pub struct FinishedGamesFilter;

impl Filter for FinishedGamesFilter {
    fn name(&self) -> &str {
        "finished-games"
    }

    fn accepts(&self, _category: Category, game: &Game) -> bool {
        game.result != crate::core::GameResult::Unfinished
    }
}

/// Build the filter named in the configuration, cheap filters first being the
/// caller's responsibility (registration order is preserved).
pub fn filter_by_name(name: &str) -> Option<Box<dyn Filter>> {
    match name {
        "rated-players" => Some(Box::new(RatedPlayersFilter::new(1600))),
        "base-game" => Some(Box::new(BaseGameFilter)),
        "queen-opening" => Some(Box::new(QueenOpeningFilter)),
        "finished-games" => Some(Box::new(FinishedGamesFilter)),
        _ => None,
    }
}
