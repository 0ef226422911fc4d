//! A fast Monte Carlo model of tennis match outcomes. Matches are simulated point by point from
//! each player's serve and return statistics, and aggregated into a win probability with a Wilson
//! score interval and score distributions.

#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod domain;
pub mod error;
pub mod file;
pub mod game;
pub mod markov;
pub mod match_sim;
pub mod mc;
pub mod point;
pub mod print;
pub mod probs;
pub mod profile;
pub mod set;
pub mod tiebreak;
pub mod timed;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
