//! Cross-entity business rules
//!
//! Planted areas of a season may never exceed the arable area of the
//! property that owns the season.

use crate::entities::{Areas, PropriedadeRural, Safra};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::Hectares;

/// Check that `requested` more hectares can be planted in `safra`
///
/// `already_planted` is the sum over the season's other cultivos.
pub fn check_planting(
    propriedade: &PropriedadeRural,
    safra: &Safra,
    already_planted: Hectares,
    requested: Hectares,
) -> DomainResult<()> {
    if safra.propriedade_id() != propriedade.id() {
        return Err(DomainError::rule(format!(
            "safra {} does not belong to propriedade {}",
            safra.id(),
            propriedade.id()
        )));
    }

    let total = already_planted + requested;
    if !total.fits_within(propriedade.area_agricultavel()) {
        return Err(DomainError::rule(format!(
            "planted area {} in safra {} would exceed area_agricultavel {} of propriedade {}",
            total.value(),
            safra.ano(),
            propriedade.area_agricultavel().value(),
            propriedade.id()
        )));
    }

    Ok(())
}

/// Check that new property areas still hold the largest planted season
pub fn check_areas_cover_plantings(areas: &Areas, max_planted: Hectares) -> DomainResult<()> {
    if !max_planted.fits_within(areas.agricultavel) {
        return Err(DomainError::rule(format!(
            "area_agricultavel {} is below the {} already planted in one safra",
            areas.agricultavel.value(),
            max_planted.value()
        )));
    }
    Ok(())
}
