//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod eval;
pub(crate) mod factors;
pub(crate) mod score;

use anyhow::{Result, bail};
use ronda_eval::RawFactor;
use ronda_factors::FactorKind;
use ronda_traits::{FactorInput, Fundamentals, OhlcvPanel};

/// Parse factor names into the closed factor set.
pub(crate) fn parse_kinds(names: &[String]) -> Result<Vec<FactorKind>> {
    if names.is_empty() {
        bail!("no factors given");
    }
    names
        .iter()
        .map(|name| name.parse::<FactorKind>().map_err(Into::into))
        .collect()
}

/// Compute raw factor panels for the selected kinds.
pub(crate) fn compute_raw_factors(
    kinds: &[FactorKind],
    ohlcv: &OhlcvPanel,
    fundamentals: Option<&Fundamentals>,
) -> Result<Vec<RawFactor>> {
    let input = FactorInput::new(ohlcv, fundamentals);
    let mut raw = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        if kind.requires_fundamentals() && fundamentals.is_none() {
            bail!("factor {} needs fundamentals, which were not loaded", kind);
        }
        let factor = kind.build();
        raw.push(RawFactor {
            name: kind.name().to_string(),
            direction: kind.direction(),
            panel: factor.compute(&input)?,
        });
    }
    Ok(raw)
}
