/*
 * Copyright 2018 Bitwise IO, Inc.
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

//! Provides a simple, in-memory implementation of state.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha512};

use super::error::{StateReadError, StateWriteError};
use super::{Read, StateChange, Write};

/// The entries of one state id, kept sorted so the id can be computed over them.
pub type State = BTreeMap<String, Vec<u8>>;

/// A collection of states.
///
/// Contains immutable individual states and insert new states instead of
/// updating existing states.
pub type States = HashMap<String, State>;

/// An in-memory implementation of state.
///
/// Stores a series of individual `State`s in a collective `HashMap`, where each
/// individual state is stored by its ID. No individual `State` gets modified on
/// updates, a new `State` is simply inserted into `States`, so earlier state ids stay
/// readable.
#[derive(Debug, Clone)]
pub struct HashMapState {
    states: Arc<Mutex<States>>,
}

impl HashMapState {
    /// Create a new HashMapState.
    ///
    /// Adds the empty state as a starting state.
    pub fn new() -> Self {
        let mut states = States::new();
        states.insert(Self::initial_state_id(), State::new());

        HashMapState {
            states: Arc::new(Mutex::new(states)),
        }
    }

    /// Calculate the ID of the given state.
    ///
    /// The id is a SHA-512 digest over the sorted entries, so equal contents always share an
    /// id.
    pub fn state_id(state: &State) -> String {
        let mut sha = Sha512::new();
        for (key, value) in state.iter() {
            sha.update(key.as_bytes());
            sha.update((value.len() as u64).to_be_bytes());
            sha.update(value);
        }
        hex::encode(sha.finalize())
    }

    /// The id of the empty state every `HashMapState` starts with.
    pub fn initial_state_id() -> String {
        Self::state_id(&State::new())
    }

    fn next_state(current_state: &State, state_changes: &[StateChange]) -> (String, State) {
        let next_state = state_changes
            .iter()
            .fold(current_state.clone(), |mut memo, ch| {
                match ch {
                    StateChange::Set { key, value } => memo.insert(key.clone(), value.clone()),
                };
                memo
            });

        (Self::state_id(&next_state), next_state)
    }
}

impl Default for HashMapState {
    fn default() -> Self {
        HashMapState::new()
    }
}

impl Write for HashMapState {
    type StateId = String;
    type Key = String;
    type Value = Vec<u8>;

    fn commit(
        &self,
        state_id: &Self::StateId,
        state_changes: &[StateChange],
    ) -> Result<Self::StateId, StateWriteError> {
        let mut states = self
            .states
            .lock()
            .map_err(|_| StateWriteError::StorageError("states lock was poisoned".into()))?;
        let state = states
            .get(state_id)
            .ok_or_else(|| StateWriteError::UnknownStateId(state_id.clone()))?;

        let (next_state_id, new_state_map) = HashMapState::next_state(state, state_changes);

        states.insert(next_state_id.clone(), new_state_map);

        Ok(next_state_id)
    }
}

impl Read for HashMapState {
    type StateId = String;
    type Key = String;
    type Value = Vec<u8>;

    fn get(
        &self,
        state_id: &Self::StateId,
        keys: &[Self::Key],
    ) -> Result<HashMap<String, Vec<u8>>, StateReadError> {
        let states = self
            .states
            .lock()
            .map_err(|_| StateReadError::StorageError("states lock was poisoned".into()))?;
        let state = states
            .get(state_id)
            .ok_or_else(|| StateReadError::UnknownStateId(state_id.clone()))?;

        Ok(keys
            .iter()
            .cloned()
            .filter_map(|k| state.get(&k).cloned().map(|v| (k, v)))
            .collect())
    }
}
