use crate::faith::DeityBehavior;
use crate::ids::DeityId;

/// Read-only deity table.
pub trait DeityOracle: Send + Sync {
    /// Looks up the behavior bound to `id`.
    fn deity(&self, id: &DeityId) -> Option<&dyn DeityBehavior>;

    /// All deity ids in the table, in a stable order.
    fn deity_ids(&self) -> Vec<DeityId>;
}
