// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node handles for arena-based storage.
//!
//! Keys are created by `slotmap::SlotMap` and stay valid for the lifetime of
//! the node. Rebuilding a subtree relinks existing slots, so a handle
//! obtained before a rebuild still refers to the same element afterwards.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to one element stored in a [`crate::ScapegoatSet`].
    pub struct NodeKey;
}
