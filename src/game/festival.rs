//! Festivals: timed production bonuses.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::ContentRepository;
use crate::error::GameError;
use crate::game::{GameCurrency, GameState, StateStore};
use crate::ids::FestivalId;

/// A festival currently in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFestival {
    /// Festival definition.
    pub id: FestivalId,
    /// Ticks until the festival ends.
    pub ticks_left: u64,
}

/// Start a festival, or restart it if it is already running.
///
/// # Errors
///
/// Returns [`GameError::UnknownFestival`] if the catalog has no such festival.
pub fn start_festival(
    store: &mut impl StateStore,
    catalog: &impl ContentRepository,
    id: &FestivalId,
) -> Result<(), GameError> {
    let festival = catalog
        .festival(id)
        .ok_or_else(|| GameError::UnknownFestival(id.clone()))?;
    let duration = festival.duration;

    store.update(|mut state| {
        state.festivals.retain(|active| &active.id != id);
        state.festivals.push(ActiveFestival {
            id: id.clone(),
            ticks_left: duration,
        });
        state
    });

    info!(festival = %id, duration, "festival started");
    Ok(())
}

/// Sum of the production bonuses of every active festival for one currency.
#[must_use]
pub fn festival_multiplier(
    state: &GameState,
    catalog: &impl ContentRepository,
    currency: GameCurrency,
) -> f64 {
    state
        .festivals
        .iter()
        .filter_map(|active| catalog.festival(&active.id))
        .filter_map(|festival| festival.production.get(&currency))
        .sum()
}

/// Count every festival down by one tick and drop the ones that ended.
pub(crate) fn age_festivals(festivals: &mut Vec<ActiveFestival>) {
    festivals.retain_mut(|active| {
        active.ticks_left = active.ticks_left.saturating_sub(1);
        if active.ticks_left == 0 {
            info!(festival = %active.id, "festival ended");
            false
        } else {
            true
        }
    });
}
