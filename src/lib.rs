//! An independent-Poisson scoregrid model of football match outcomes. Builds the joint
//! home/away scoreline distribution from a pair of expected-goals rates and derives the
//! most likely correct score, total-goals and both-teams-to-score probabilities, and the
//! top-ranked halftime/fulltime combinations.

pub mod data;
pub mod factorial;
pub mod forecast;
pub mod linear;
pub mod poisson;
pub mod print;
pub mod probs;
pub mod rates;
pub mod scoregrid;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
