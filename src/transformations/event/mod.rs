//! Event handlers for the supported envelope kinds.

mod curate_offer;
mod dynamic_price;

pub use curate_offer::CurateOfferHandler;
pub use dynamic_price::DynamicPriceHandler;

use super::registry::TransformRegistry;

/// Register all event handlers.
pub fn register_handlers(registry: &mut TransformRegistry) {
    registry.register(DynamicPriceHandler);
    registry.register(CurateOfferHandler);
}
