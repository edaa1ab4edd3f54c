//! Standings-based estimation of expected-goals rates: the collaborator that feeds the
//! forecast engine. The estimation is a heuristic, not a fitted model; points per game
//! and goal difference per game split a league-average base rate between the two sides,
//! with a constant home advantage and optional per-team adjustments on top. The engine
//! itself never sees any of this, only the resulting rate pair.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tinyrand::Rand;

/// Rates never collapse all the way to zero, however lopsided the table.
const MIN_RATE: f64 = 0.1;

/// One row of a league table.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub played: u16,
    pub points: u16,
    pub goals_for: u16,
    pub goals_against: u16,
}
impl TeamRecord {
    pub fn points_per_game(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            self.points as f64 / self.played as f64
        }
    }

    pub fn goal_diff_per_game(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            (self.goals_for as f64 - self.goals_against as f64) / self.played as f64
        }
    }
}

/// Maps a home/away pair of standings records to the `(home_rate, away_rate)` pair
/// consumed by the forecast engine.
#[derive(Clone, Debug)]
pub struct Estimator {
    /// League-average expected goals per side.
    pub base_rate: f64,

    /// Constant added to the home side's rate.
    pub home_advantage: f64,

    /// Weight of the points-per-game differential.
    pub ppg_weight: f64,

    /// Weight of the goal-difference-per-game differential.
    pub gd_weight: f64,

    /// Additive per-team adjustments, keyed by team name. Supplied by the caller;
    /// nothing is hardcoded here.
    pub bonuses: FxHashMap<String, f64>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            base_rate: 1.3,
            home_advantage: 0.3,
            ppg_weight: 0.25,
            gd_weight: 0.2,
            bonuses: FxHashMap::default(),
        }
    }
}

impl Estimator {
    pub fn rates(&self, home: &TeamRecord, away: &TeamRecord) -> (f64, f64) {
        let edge = self.ppg_weight * (home.points_per_game() - away.points_per_game())
            + self.gd_weight * (home.goal_diff_per_game() - away.goal_diff_per_game());
        let home_rate = self.base_rate + self.home_advantage + edge + self.bonus(&home.name);
        let away_rate = self.base_rate - edge + self.bonus(&away.name);
        (home_rate.max(MIN_RATE), away_rate.max(MIN_RATE))
    }

    fn bonus(&self, name: &str) -> f64 {
        self.bonuses.get(name).copied().unwrap_or(0.0)
    }
}

/// Perturbs both rates by up to ±`magnitude` (relative), drawing from the supplied
/// source. The forecast core stays deterministic; randomness enters only through this
/// boundary, and a seeded source reproduces the perturbation exactly.
pub fn jitter(rates: (f64, f64), magnitude: f64, rand: &mut impl Rand) -> (f64, f64) {
    let (home_rate, away_rate) = rates;
    (
        (home_rate * (1.0 + magnitude * centred_f64(rand))).max(0.0),
        (away_rate * (1.0 + magnitude * centred_f64(rand))).max(0.0),
    )
}

fn centred_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64 * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use tinyrand::{Seeded, StdRand};

    fn record(name: &str, played: u16, points: u16, goals_for: u16, goals_against: u16) -> TeamRecord {
        TeamRecord {
            name: name.into(),
            played,
            points,
            goals_for,
            goals_against,
        }
    }

    #[test]
    fn per_game_accessors() {
        let team = record("Arsenal", 10, 23, 21, 9);
        assert_float_absolute_eq!(2.3, team.points_per_game());
        assert_float_absolute_eq!(1.2, team.goal_diff_per_game());
    }

    #[test]
    fn unplayed_team_rates_are_neutral() {
        let team = record("Arsenal", 0, 0, 0, 0);
        assert_eq!(0.0, team.points_per_game());
        assert_eq!(0.0, team.goal_diff_per_game());
    }

    #[test]
    fn evenly_matched_sides_differ_by_home_advantage() {
        let estimator = Estimator::default();
        let home = record("Arsenal", 10, 20, 15, 10);
        let away = record("Chelsea", 10, 20, 15, 10);
        let (home_rate, away_rate) = estimator.rates(&home, &away);
        assert_float_absolute_eq!(estimator.home_advantage, home_rate - away_rate, 1e-12);
    }

    #[test]
    fn stronger_side_gets_higher_rate() {
        let estimator = Estimator::default();
        let strong = record("Arsenal", 10, 27, 28, 8);
        let weak = record("Luton", 10, 5, 7, 25);
        let (home_rate, away_rate) = estimator.rates(&strong, &weak);
        assert!(home_rate > away_rate);

        // flipped venue: the weak side at home keeps the advantage constant but not the edge
        let (weak_home_rate, strong_away_rate) = estimator.rates(&weak, &strong);
        assert!(strong_away_rate > weak_home_rate);
    }

    #[test]
    fn lopsided_table_clamps_at_floor() {
        let estimator = Estimator::default();
        let strong = record("Arsenal", 10, 30, 50, 0);
        let weak = record("Luton", 10, 0, 0, 50);
        let (_, away_rate) = estimator.rates(&strong, &weak);
        assert_eq!(MIN_RATE, away_rate);
    }

    #[test]
    fn bonuses_are_additive() {
        let mut estimator = Estimator::default();
        estimator.bonuses.insert("Arsenal".into(), 0.2);
        let home = record("Arsenal", 10, 20, 15, 10);
        let away = record("Chelsea", 10, 20, 15, 10);
        let (with_bonus, _) = estimator.rates(&home, &away);
        let (without_bonus, _) = Estimator::default().rates(&home, &away);
        assert_float_absolute_eq!(0.2, with_bonus - without_bonus, 1e-12);
    }

    #[test]
    fn jitter_zero_magnitude_is_identity() {
        let mut rand = StdRand::seed(42);
        let (home_rate, away_rate) = jitter((1.6, 1.3), 0.0, &mut rand);
        assert_eq!(1.6, home_rate);
        assert_eq!(1.3, away_rate);
    }

    #[test]
    fn jitter_stays_within_magnitude() {
        let mut rand = StdRand::seed(42);
        for _ in 0..100 {
            let (home_rate, away_rate) = jitter((1.6, 1.3), 0.1, &mut rand);
            assert!((1.44..=1.76).contains(&home_rate), "home_rate: {home_rate}");
            assert!((1.17..=1.43).contains(&away_rate), "away_rate: {away_rate}");
        }
    }

    #[test]
    fn jitter_reproducible_under_fixed_seed() {
        let first = jitter((1.6, 1.3), 0.1, &mut StdRand::seed(42));
        let second = jitter((1.6, 1.3), 0.1, &mut StdRand::seed(42));
        assert_eq!(first, second);
    }
}
