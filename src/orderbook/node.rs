//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` holds one resting order's id and remaining volume together
//! with doubly-linked list pointers, so an order can be unlinked from its
//! price batch in O(1) given its slab key.
//!
//! ## Linked List
//!
//! Orders at the same price form a doubly-linked list:
//! - `next`: Points to the next order (newer) in the batch
//! - `prev`: Points to the previous order (older) in the batch

use crate::types::{OrderId, Volume};

/// Order node stored in a batch's slab.
///
/// The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNode {
    /// Order identifier
    pub id: OrderId,

    /// Remaining resting volume
    pub volume: Volume,

    /// Next order in the batch queue (slab key)
    /// None if this is the tail (newest order)
    pub next: Option<usize>,

    /// Previous order in the batch queue (slab key)
    /// None if this is the head (oldest order)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new order node (not yet linked)
    #[inline]
    pub fn new(id: OrderId, volume: Volume) -> Self {
        Self {
            id,
            volume,
            next: None,
            prev: None,
        }
    }
}
