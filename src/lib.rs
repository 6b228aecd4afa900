// SPDX-License-Identifier: PMPL-1.0-or-later

//! Panic-Atlas: backtesting spatial panic signatures in search-interest data.
//!
//! Turns per-state keyword intensities collected around historical market
//! events into classified verdicts, and reduces many verdicts into a single
//! validity report for the underlying hypothesis.
//!
//! PIPELINE:
//! 1. **Scoring**: keyword intensities -> one panic score per state.
//! 2. **Regions**: scores -> set of affected regions.
//! 3. **Signatures**: state count, regional spread and major-state presence
//!    -> strength-classified verdict per event.
//! 4. **Report**: verdicts -> detection rate and scenario.
//!
//! Every stage is a pure function of its inputs; the only I/O lives in
//! `storage`.

pub mod backtest;
pub mod config;
pub mod error;
pub mod events;
pub mod regions;
pub mod report;
pub mod scoring;
pub mod signatures;
pub mod storage;
pub mod types;

pub use error::{AtlasError, AtlasResult};
