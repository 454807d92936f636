//! Price batch: the FIFO queue of resting orders at one price.
//!
//! ## Design
//!
//! A `PriceBatch` represents all orders of one (symbol, side, price) tier.
//! Orders live in a slab and are threaded into a doubly-linked list for
//! price-time priority; a side index maps order id to slab key.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be removed in O(1) by id
//!
//! ## Volume Updates
//!
//! | Update | Effect on priority |
//! |--------|--------------------|
//! | Decrease (incl. to zero) | Keeps position, removes at zero |
//! | Increase | Re-queued at the tail |

use std::collections::HashMap;

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{OrderId, Price, TotalVolume, Volume};

/// A FIFO batch of resting orders sharing one price.
///
/// ## Invariants
///
/// - `total_volume` equals the sum of the nodes' volumes
/// - every node has non-zero volume
/// - `index` holds exactly the ids of the linked nodes
#[derive(Debug, Clone)]
pub struct PriceBatch {
    /// Price for this batch (fixed-point)
    price: Price,

    /// Sum of remaining volume at this price
    total_volume: TotalVolume,

    /// Head of the order queue (oldest order, slab key)
    head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    tail: Option<usize>,

    /// Node storage, keys stay valid until the node is removed
    nodes: Slab<OrderNode>,

    /// Order id to slab key
    index: HashMap<OrderId, usize>,
}

impl PriceBatch {
    /// Create a new empty batch
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_volume: 0,
            head: None,
            tail: None,
            nodes: Slab::new(),
            index: HashMap::new(),
        }
    }

    /// Price of this batch
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Check if the batch is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Total remaining volume of all orders in the batch
    #[inline]
    pub fn total_volume(&self) -> TotalVolume {
        self.total_volume
    }

    /// Check if an order rests in this batch
    #[inline]
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Remaining volume of an order, if present
    pub fn volume_of(&self, order_id: OrderId) -> Option<Volume> {
        let key = *self.index.get(&order_id)?;
        self.nodes.get(key).map(|node| node.volume)
    }

    /// The chronologically first order, next in line to be matched
    #[inline]
    pub fn top_order(&self) -> Option<&OrderNode> {
        self.head.and_then(|key| self.nodes.get(key))
    }

    /// Iterate orders from oldest to newest
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an order at the back of the queue
    ///
    /// # Returns
    ///
    /// `false` (and no change) if the id is already in the batch
    ///
    /// # Panics
    ///
    /// Panics if `volume` is zero: an order only rests with volume.
    pub fn add(&mut self, order_id: OrderId, volume: Volume) -> bool {
        assert!(volume > 0, "order {order_id} cannot rest with zero volume");

        if self.index.contains_key(&order_id) {
            return false;
        }

        let key = self.nodes.insert(OrderNode::new(order_id, volume));
        self.index.insert(order_id, key);
        self.link_back(key);
        true
    }

    /// Remove an order by id
    ///
    /// # Returns
    ///
    /// `true` if the order was present
    pub fn erase(&mut self, order_id: OrderId) -> bool {
        match self.index.get(&order_id) {
            Some(&key) => {
                self.unlink(key);
                true
            }
            None => false,
        }
    }

    /// Set the remaining volume of an order by id
    ///
    /// A decrease keeps the order's position (zero removes it). An increase
    /// re-queues the order at the back with the new volume.
    ///
    /// # Returns
    ///
    /// `true` if the order was present
    pub fn update_volume(&mut self, order_id: OrderId, new_volume: Volume) -> bool {
        let Some(&key) = self.index.get(&order_id) else {
            return false;
        };

        if new_volume <= self.nodes[key].volume {
            self.reduce(key, new_volume);
        } else {
            self.unlink(key);
            self.add(order_id, new_volume);
        }
        true
    }

    /// Decrease the volume of the top order in place (zero removes it)
    ///
    /// # Returns
    ///
    /// `false` if the batch is empty
    ///
    /// # Panics
    ///
    /// Panics if `new_volume` is larger than the top order's volume. This
    /// path is decrease-only; increases go through [`update_volume`].
    ///
    /// [`update_volume`]: PriceBatch::update_volume
    pub fn reduce_top(&mut self, new_volume: Volume) -> bool {
        match self.head {
            Some(key) => {
                self.reduce(key, new_volume);
                true
            }
            None => false,
        }
    }

    fn reduce(&mut self, key: usize, new_volume: Volume) {
        let node = &mut self.nodes[key];
        assert!(
            new_volume <= node.volume,
            "decrease-only update of order {} from {} to {}",
            node.id,
            node.volume,
            new_volume
        );

        if new_volume == 0 {
            self.unlink(key);
        } else {
            self.total_volume -= TotalVolume::from(node.volume - new_volume);
            node.volume = new_volume;
        }
    }

    /// Link an already stored node at the tail
    fn link_back(&mut self, key: usize) {
        let old_tail = self.tail;

        let node = &mut self.nodes[key];
        node.prev = old_tail;
        node.next = None;
        let volume = node.volume;

        match old_tail {
            Some(tail_key) => self.nodes[tail_key].next = Some(key),
            // Empty list - this is also the head
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.total_volume += TotalVolume::from(volume);
    }

    /// Unlink a node, drop it from storage and the index
    fn unlink(&mut self, key: usize) -> OrderNode {
        let node = self.nodes.remove(key);

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        self.index.remove(&node.id);
        self.total_volume -= TotalVolume::from(node.volume);
        node
    }
}

/// FIFO iterator over a batch, oldest first
pub struct Iter<'a> {
    nodes: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a OrderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(node)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
