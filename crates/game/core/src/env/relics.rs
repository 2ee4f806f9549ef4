use crate::ids::RelicId;
use crate::relic::RelicBehavior;

/// Read-only relic table.
pub trait RelicOracle: Send + Sync {
    /// Looks up the behavior bound to `id`.
    fn relic(&self, id: &RelicId) -> Option<&dyn RelicBehavior>;

    /// All relic ids in the table, in a stable order.
    fn relic_ids(&self) -> Vec<RelicId>;
}
