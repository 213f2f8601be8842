use serde::{Deserialize, Serialize};

/// Identifies an order in the external order catalog. Cheap to copy and compare.
///
/// The engine never dereferences an `OrderId`; it only carries it through
/// procedures and completion events back to the order-management layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

/// Identifies a catalog option (one unit of requested work on an order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionId(pub u32);
