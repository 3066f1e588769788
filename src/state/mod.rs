/*
 * Copyright 2018 Bitwise IO, Inc.
 * Copyright 2019 Cargill Incorporated
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! Versioned key/value state.
//!
//! Every commit produces a new state id and leaves the state it was applied to untouched, so
//! a transaction can keep reading the snapshot it started from while the ledger moves on.
//! Keys are family addresses and values are encoded entities.

pub mod error;
pub mod hashmap;

use std::collections::HashMap;

pub use crate::state::error::{StateReadError, StateWriteError};

/// A single change in a commit: set a key to a value.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Set { key: String, value: Vec<u8> },
}

/// Commits ordered changes on top of an existing state id.
pub trait Write: Sync + Send {
    type StateId;
    type Key;
    type Value;

    /// Applies `state_changes` in order on top of `state_id` and returns the id of the
    /// resulting state.
    ///
    /// # Errors
    ///
    /// `StateWriteError::UnknownStateId` if `state_id` was never produced by this store.
    fn commit(
        &self,
        state_id: &Self::StateId,
        state_changes: &[StateChange],
    ) -> Result<Self::StateId, StateWriteError>;
}

/// Reads entries as of a given state id.
pub trait Read: Sync + Send {
    type StateId;
    type Key;
    type Value;

    /// Returns the entries found for `keys` at `state_id`. Keys that are not set are absent
    /// from the map.
    fn get(
        &self,
        state_id: &Self::StateId,
        keys: &[Self::Key],
    ) -> Result<HashMap<Self::Key, Self::Value>, StateReadError>;
}
