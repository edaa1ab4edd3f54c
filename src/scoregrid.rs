//! Scoregrid construction and market derivation. The scoregrid is the joint scoreline
//! distribution: cell `(h, a)` holds the probability that the home side scores `h` goals
//! and the away side scores `a`, for all counts below the grid's cap. Probability mass
//! above the cap is discarded, not redistributed, so derivations over the grid are
//! lower-bound approximations with a negligible tail for realistic rates.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::factorial::Lookup;
use crate::linear::Matrix;
use crate::poisson;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// Truncated marginal distribution of one side's goal count: entry `k` holds the Poisson
/// mass at `k` for the given rate. The discarded tail means the entries sum to slightly
/// less than one.
pub fn goal_distribution(rate: f64, cap: usize) -> Vec<f64> {
    let factorial = Lookup::default();
    (0..cap)
        .map(|k| poisson::mass(k as i64, rate, &factorial))
        .collect()
}

/// Fills `scoregrid` with the outer product of the home and away marginals: the joint
/// distribution under the modeling assumption that the two goal counts are independent
/// Poisson variables.
pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, scoregrid: &mut Matrix) {
    let home_probs = goal_distribution(home_rate, scoregrid.rows());
    let away_probs = goal_distribution(away_rate, scoregrid.cols());
    for (home_goals, &home_prob) in home_probs.iter().enumerate() {
        for (away_goals, &away_prob) in away_probs.iter().enumerate() {
            scoregrid[(home_goals, away_goals)] = home_prob * away_prob;
        }
    }
}

/// Locates the maximum-likelihood scoreline, scanning home goals in the outer loop and
/// away goals in the inner. The comparison is strict, so among equal cells the first in
/// scan order wins. Returns `None` for an empty grid.
pub fn most_likely_score(scoregrid: &Matrix) -> Option<Score> {
    if scoregrid.rows() == 0 || scoregrid.cols() == 0 {
        return None;
    }
    let mut best = Score::nil_all();
    let mut best_prob = scoregrid[(0, 0)];
    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            if prob > best_prob {
                best_prob = prob;
                best = Score::new(home_goals as u8, away_goals as u8);
            }
        }
    }
    Some(best)
}

/// Expected home and away goals under the truncated grid.
pub fn home_away_expectations(scoregrid: &Matrix) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);

    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            home_expectation += home_goals as f64 * prob;
            away_expectation += away_goals as f64 * prob;
        }
    }

    (home_expectation, away_expectation)
}

/// An outcome whose probability is obtained by gathering a region of the scoregrid.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsUnder(u8),
    GoalsOver(u8),
    BothScore,
    CorrectScore(Score),
}
impl Outcome {
    pub fn gather(&self, scoregrid: &Matrix) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::GoalsUnder(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::GoalsOver(goals) => Self::gather_goals_over(*goals, scoregrid),
            Outcome::BothScore => Self::gather_both_score(scoregrid),
            Outcome::CorrectScore(score) => Self::gather_correct_score(score, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..row {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..col {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix) -> f64 {
        let mut prob = 0.0;
        for index in 0..scoregrid.rows() {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_goals_over(goals: u8, scoregrid: &Matrix) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &Matrix) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_both_score(scoregrid: &Matrix) -> f64 {
        let mut prob = 0.0;
        for row in 1..scoregrid.rows() {
            for col in 1..scoregrid.cols() {
                prob += scoregrid[(row, col)];
            }
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &Matrix) -> f64 {
        if (score.home as usize) < scoregrid.rows() && (score.away as usize) < scoregrid.cols() {
            scoregrid[(score.home as usize, score.away as usize)]
        } else {
            0.0
        }
    }
}
