// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # obj-lite Tree
//!
//! Weight-balanced scapegoat tree used as an ordered set.
//!
//! Nodes live in a `slotmap` arena and refer to their children by
//! [`NodeKey`]; there are no parent links and no rotations. Rebalancing
//! flattens the scapegoat subtree and relinks it as a complete binary tree
//! in place. Handles stay valid across rebuilds, which lets callers attach
//! data to elements with a `slotmap::SecondaryMap`.

pub mod error;
pub mod keys;
pub mod set;

pub use error::{Error, Result};
pub use keys::NodeKey;
pub use set::{Iter, ScapegoatSet, DEFAULT_BALANCE_FACTOR};
