//! The match forecast engine. Consumes a pair of expected-goals rates, builds the
//! full-time and halftime scoregrids, and derives the ranked outcome set: the most
//! likely correct score, the headline scalar markets, and the top halftime/fulltime
//! combinations.
//!
//! Every derivation is a pure function of its inputs. Nothing is cached or mutated in
//! place across calls, and identical inputs produce bit-identical forecasts.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::debug;

use crate::factorial::Lookup;
use crate::linear::Matrix;
use crate::poisson;
use crate::scoregrid;
use crate::scoregrid::{Outcome, Score, Side};

/// Derivation parameters. The defaults reproduce the conventional market set: an 8-goal
/// full-time universe, a 4-goal halftime universe with 45% of expected goals falling in
/// the first half, the over-2.5 line and five halftime/fulltime combinations.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bound of the full-time scoreline universe; scores range over `0..fulltime_cap`.
    pub fulltime_cap: usize,

    /// Bound of the halftime scoreline universe.
    pub halftime_cap: usize,

    /// Fraction of full-match expected goals occurring in the first half.
    pub halftime_fraction: f64,

    /// Total-goals line: the over market is `P(total goals > over_threshold)`.
    pub over_threshold: u8,

    /// Number of halftime/fulltime combinations retained.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fulltime_cap: 8,
            halftime_cap: 4,
            halftime_fraction: 0.45,
            over_threshold: 2,
            top_k: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidInput {
    #[error("rate must be finite and non-negative, got {0}")]
    InvalidRate(f64),

    #[error("goal cap must be positive")]
    ZeroCap,

    #[error("halftime fraction must be finite and non-negative, got {0}")]
    InvalidHalftimeFraction(f64),

    #[error("empty scoregrid")]
    EmptyScoregrid,
}

/// A halftime scoreline paired with the full-time maximum-likelihood scoreline. The
/// weight is the product of the two grid cells, treating halftime and full-time as
/// independent; they are not in reality, and the ranking inherits that simplification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HalftimeFulltime {
    pub halftime: Score,
    pub fulltime: Score,
    pub weight: f64,
}

impl Display for HalftimeFulltime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.halftime, self.fulltime)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Forecast {
    pub most_likely: Score,
    pub most_likely_probability: f64,
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub over: f64,
    pub both_teams_to_score: f64,
    pub halftime_over: f64,
    pub expected_home_goals: f64,
    pub expected_away_goals: f64,
    pub combinations: Vec<HalftimeFulltime>,
}

/// The scalar markets a forecast carries, enumerable for tabulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum DerivedMarket {
    HomeWin,
    Draw,
    AwayWin,
    TotalGoalsOver,
    BothTeamsToScore,
    FirstHalfGoal,
}

impl DerivedMarket {
    pub fn value(&self, forecast: &Forecast) -> f64 {
        match self {
            DerivedMarket::HomeWin => forecast.home_win,
            DerivedMarket::Draw => forecast.draw,
            DerivedMarket::AwayWin => forecast.away_win,
            DerivedMarket::TotalGoalsOver => forecast.over,
            DerivedMarket::BothTeamsToScore => forecast.both_teams_to_score,
            DerivedMarket::FirstHalfGoal => forecast.halftime_over,
        }
    }

    pub fn label(&self, config: &Config) -> String {
        match self {
            DerivedMarket::HomeWin => "Home win".into(),
            DerivedMarket::Draw => "Draw".into(),
            DerivedMarket::AwayWin => "Away win".into(),
            DerivedMarket::TotalGoalsOver => format!("Over {}.5", config.over_threshold),
            DerivedMarket::BothTeamsToScore => "Both teams to score".into(),
            DerivedMarket::FirstHalfGoal => "First-half over 0.5".into(),
        }
    }
}

/// Derives a complete forecast from the given expected-goals rates.
pub fn compute(home_rate: f64, away_rate: f64, config: &Config) -> Result<Forecast, InvalidInput> {
    validate_rate(home_rate)?;
    validate_rate(away_rate)?;
    if config.fulltime_cap == 0 || config.halftime_cap == 0 {
        return Err(InvalidInput::ZeroCap);
    }
    if !config.halftime_fraction.is_finite() || config.halftime_fraction < 0.0 {
        return Err(InvalidInput::InvalidHalftimeFraction(config.halftime_fraction));
    }

    let mut fulltime = Matrix::allocate(config.fulltime_cap, config.fulltime_cap);
    scoregrid::from_univariate_poisson(home_rate, away_rate, &mut fulltime);
    let most_likely =
        scoregrid::most_likely_score(&fulltime).ok_or(InvalidInput::EmptyScoregrid)?;
    debug!("most likely score {most_likely} for rates {home_rate:.3}/{away_rate:.3}");

    let mut halftime = Matrix::allocate(config.halftime_cap, config.halftime_cap);
    scoregrid::from_univariate_poisson(
        home_rate * config.halftime_fraction,
        away_rate * config.halftime_fraction,
        &mut halftime,
    );
    let combinations = rank_combinations(&halftime, &fulltime, &most_likely, config.top_k);

    let (expected_home_goals, expected_away_goals) = scoregrid::home_away_expectations(&fulltime);

    Ok(Forecast {
        most_likely_probability: Outcome::CorrectScore(most_likely.clone()).gather(&fulltime),
        home_win: Outcome::Win(Side::Home).gather(&fulltime),
        draw: Outcome::Draw.gather(&fulltime),
        away_win: Outcome::Win(Side::Away).gather(&fulltime),
        over: over_probability(home_rate, away_rate, config.over_threshold),
        both_teams_to_score: Outcome::BothScore.gather(&fulltime),
        halftime_over: first_half_goal_probability(
            home_rate,
            away_rate,
            config.halftime_fraction,
        ),
        expected_home_goals,
        expected_away_goals,
        combinations,
        most_likely,
    })
}

/// `P(total goals > threshold)`, evaluated in closed form: the sum of two independent
/// Poisson variables is Poisson with the summed rate, so no grid truncation is involved.
pub fn over_probability(home_rate: f64, away_rate: f64, threshold: u8) -> f64 {
    let factorial = Lookup::default();
    let total_rate = home_rate + away_rate;
    let mut under = 0.0;
    for count in 0..=threshold {
        under += poisson::mass(count as i64, total_rate, &factorial);
    }
    (1.0 - under).max(0.0)
}

/// Probability of at least one first-half goal: one minus the probability that neither
/// side scores in the half, with both rates scaled to the first-half fraction.
pub fn first_half_goal_probability(
    home_rate: f64,
    away_rate: f64,
    halftime_fraction: f64,
) -> f64 {
    let factorial = Lookup::default();
    1.0 - poisson::mass(0, home_rate * halftime_fraction, &factorial)
        * poisson::mass(0, away_rate * halftime_fraction, &factorial)
}

/// Pairs every halftime cell with the single full-time maximum-likelihood scoreline and
/// ranks the pairings by weight. The sort is stable and the cells are generated in
/// row-major order, so equal weights keep their scan-order precedence.
pub fn rank_combinations(
    halftime: &Matrix,
    fulltime: &Matrix,
    most_likely: &Score,
    top_k: usize,
) -> Vec<HalftimeFulltime> {
    let fulltime_prob =
        fulltime[(most_likely.home as usize, most_likely.away as usize)];
    let mut combinations = Vec::with_capacity(halftime.rows() * halftime.cols());
    for home_goals in 0..halftime.rows() {
        for away_goals in 0..halftime.cols() {
            combinations.push(HalftimeFulltime {
                halftime: Score::new(home_goals as u8, away_goals as u8),
                fulltime: most_likely.clone(),
                weight: halftime[(home_goals, away_goals)] * fulltime_prob,
            });
        }
    }
    combinations.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    combinations.truncate(top_k);
    combinations
}

fn validate_rate(rate: f64) -> Result<(), InvalidInput> {
    if !rate.is_finite() || rate < 0.0 {
        Err(InvalidInput::InvalidRate(rate))
    } else {
        Ok(())
    }
}
