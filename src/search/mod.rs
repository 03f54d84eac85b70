//! Adversarial search over joint squad actions

pub mod alphabeta;

pub use alphabeta::{AlphaBeta, SearchStats};
