/*
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

//! The staging area for a single transaction.
//!
//! A `Context` records every state change, event and receipt blob a transaction produces on
//! top of a base state id. Nothing reaches state until the executor commits the context;
//! dropping it discards the transaction's effects.

use crate::protocol::receipt::{Event, StateChange};

#[derive(Debug, Clone, Default)]
pub struct Context {
    state_changes: Vec<StateChange>,
    data: Vec<Vec<u8>>,
    events: Vec<Event>,
    state_id: String,
}

impl Context {
    pub fn new(state_id: &str) -> Self {
        Context {
            state_id: state_id.to_string(),
            state_changes: Vec::new(),
            data: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &Vec<Event> {
        &self.events
    }

    pub fn state_changes(&self) -> &Vec<StateChange> {
        &self.state_changes
    }

    pub fn data(&self) -> &Vec<Vec<u8>> {
        &self.data
    }

    /// The state id this context reads through to for keys it has not touched.
    pub fn state_id(&self) -> &String {
        &self.state_id
    }

    pub fn add_event(&mut self, event: Event) {
        if !self.events().contains(&event) {
            self.events.push(event);
        }
    }

    pub fn add_data(&mut self, data: Vec<u8>) {
        if !self.data().contains(&data) {
            self.data.push(data);
        }
    }

    pub fn get_state(&self, key: &str) -> Option<&Vec<u8>> {
        self.state_changes
            .iter()
            .rev()
            .find(|state_change| state_change.has_key(key))
            .map(|StateChange::Set { value, .. }| value)
    }

    /// Adds StateChange::Set without deleting previous StateChanges associated with the Key
    pub fn set_state(&mut self, key: String, value: Vec<u8>) {
        let new_state_change = StateChange::Set { key, value };
        self.state_changes.push(new_state_change);
    }

    /// Checks to see if the Key is referenced by any StateChanges within the Context.
    pub fn contains(&self, key: &str) -> bool {
        self.state_changes
            .iter()
            .rev()
            .any(|state_change| state_change.has_key(key))
    }

    /// Collapses the recorded changes so that each key appears once, in the order it was
    /// first touched, carrying its final value.
    pub fn squashed_state_changes(&self) -> Vec<StateChange> {
        let mut squashed: Vec<StateChange> = Vec::new();
        for state_change in self.state_changes.iter() {
            let key = state_change.key();
            match squashed.iter_mut().find(|existing| existing.has_key(key)) {
                Some(existing) => *existing = state_change.clone(),
                None => squashed.push(state_change.clone()),
            }
        }
        squashed
    }
}
