//! Move-supplying strategies built on top of the `tents` solving engine:
//! `GreedyBot` (local heuristics only), `SmartBot` (heuristics plus line
//! enumeration and region decomposition), and `BackBot` (full propagation
//! plus backtracking search, with its solved grid cached across calls).

extern crate log;
extern crate tents;

pub mod backbot;
pub mod greedybot;
pub mod smartbot;

pub use backbot::BackBot;
pub use greedybot::GreedyBot;
pub use smartbot::SmartBot;
