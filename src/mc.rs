//! The Monte Carlo estimator. Runs a number of independent match trials and aggregates them into a
//! win probability for player 1, with a Wilson score interval and score-frequency tables.
//!
//! Every trial draws from its own generator, seeded from the engine's seed and the trial index.
//! Trials therefore share no mutable state, and the summary for a given seed is the same whether
//! the trials run sequentially or in parallel.

use std::hash::Hash;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tinyrand::{Seeded, Wyrand};
use tracing::debug;

use crate::config::{AdjustmentConfig, IterationLimits, MatchFormat, SimConfig};
use crate::domain::{Player, Score};
use crate::error::{InvalidConfig, NonTerminating, SimulationError};
use crate::match_sim::{self, MatchOutcome};
use crate::probs::{wilson_interval, Fraction, Interval};
use crate::profile::PlayerProfile;

pub const DEFAULT_TRIALS: u64 = 10_000;
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    trials: u64,
    seed: u64,
    confidence_level: f64,
    parallel: bool,
    config: SimConfig,
}
impl MonteCarloEngine {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_format(mut self, format: MatchFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn with_adjustment(mut self, adjustment: AdjustmentConfig) -> Self {
        self.config.adjustment = adjustment;
        self
    }

    pub fn with_limits(mut self, limits: IterationLimits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.trials == 0 {
            return Err(InvalidConfig("at least one trial must be run".into()));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(InvalidConfig(format!(
                "confidence level must lie in (0, 1), got {}",
                self.confidence_level
            )));
        }
        self.config.validate()
    }

    /// Estimates the probability that `p1` beats `p2`.
    pub fn simulate(
        &self,
        p1: &PlayerProfile,
        p2: &PlayerProfile,
    ) -> Result<SimulationSummary, SimulationError> {
        p1.validate()?;
        p2.validate()?;
        self.validate()?;
        debug!(
            "simulating {} trials (seed: {}, parallel: {}) with {:?}",
            self.trials, self.seed, self.parallel, self.config
        );

        let tally = if self.parallel {
            (0..self.trials)
                .into_par_iter()
                .try_fold(Tally::default, |mut tally, trial| {
                    tally.record(&self.run_trial(p1, p2, trial)?);
                    Ok::<_, NonTerminating>(tally)
                })
                .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?
        } else {
            let mut tally = Tally::default();
            for trial in 0..self.trials {
                tally.record(&self.run_trial(p1, p2, trial)?);
            }
            tally
        };

        let summary = tally.summarise(self.trials, self.confidence_level);
        debug!(
            "p1 won {} with {:.0}% interval {}",
            summary.p1_wins,
            summary.confidence_level * 100.0,
            summary.confidence_interval
        );
        Ok(summary)
    }

    /// Simulates a single trial. The outcome depends only on the engine's seed, the trial index
    /// and the inputs.
    pub fn run_trial(
        &self,
        p1: &PlayerProfile,
        p2: &PlayerProfile,
        trial: u64,
    ) -> Result<MatchOutcome, NonTerminating> {
        let mut rand = Wyrand::seed(derive_seed(self.seed, trial));
        match_sim::simulate(p1, p2, &self.config, &mut rand)
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: 0,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            parallel: false,
            config: SimConfig::default(),
        }
    }
}

/// SplitMix64 finaliser over the base seed and the trial index.
pub fn derive_seed(seed: u64, trial: u64) -> u64 {
    let mut z = seed.wrapping_add(trial.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frequency<K> {
    pub outcome: K,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub p1_wins: Fraction,
    pub win_probability_p1: f64,
    pub confidence_level: f64,
    pub confidence_interval: Interval,
    /// Frequencies of complete score lines from player 1's perspective, most frequent first.
    pub full_score_distribution: Vec<Frequency<String>>,
    /// Frequencies of the final set count, most frequent first.
    pub set_score_distribution: Vec<Frequency<Score>>,
    pub tiebreaks: u64,
}
impl SimulationSummary {
    pub fn trials(&self) -> u64 {
        self.p1_wins.denominator
    }

    pub fn win_probability(&self, player: Player) -> f64 {
        match player {
            Player::P1 => self.win_probability_p1,
            Player::P2 => 1.0 - self.win_probability_p1,
        }
    }

    /// Mean number of tiebreaks played per match.
    pub fn tiebreaks_per_match(&self) -> f64 {
        self.tiebreaks as f64 / self.trials() as f64
    }
}

#[derive(Debug, Default)]
struct Tally {
    p1_wins: u64,
    tiebreaks: u64,
    full_scores: FxHashMap<String, u64>,
    set_scores: FxHashMap<Score, u64>,
}
impl Tally {
    fn record(&mut self, outcome: &MatchOutcome) {
        if outcome.winner == Player::P1 {
            self.p1_wins += 1;
        }
        self.tiebreaks += outcome.tiebreaks() as u64;
        *self.full_scores.entry(outcome.score_line()).or_insert(0) += 1;
        *self.set_scores.entry(outcome.sets).or_insert(0) += 1;
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.p1_wins += other.p1_wins;
        self.tiebreaks += other.tiebreaks;
        for (score, count) in other.full_scores {
            *self.full_scores.entry(score).or_insert(0) += count;
        }
        for (score, count) in other.set_scores {
            *self.set_scores.entry(score).or_insert(0) += count;
        }
        self
    }

    fn summarise(self, trials: u64, confidence_level: f64) -> SimulationSummary {
        let p1_wins = Fraction {
            numerator: self.p1_wins,
            denominator: trials,
        };
        let confidence_interval = wilson_interval(&p1_wins, confidence_level);
        SimulationSummary {
            win_probability_p1: p1_wins.quotient(),
            p1_wins,
            confidence_level,
            confidence_interval,
            full_score_distribution: frequencies(self.full_scores, trials),
            set_score_distribution: frequencies(self.set_scores, trials),
            tiebreaks: self.tiebreaks,
        }
    }
}

fn frequencies<K: Hash + Eq + Ord>(counts: FxHashMap<K, u64>, trials: u64) -> Vec<Frequency<K>> {
    let mut frequencies: Vec<_> = counts
        .into_iter()
        .map(|(outcome, count)| Frequency {
            outcome,
            count,
            percentage: count as f64 * 100.0 / trials as f64,
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.outcome.cmp(&b.outcome)));
    frequencies
}
