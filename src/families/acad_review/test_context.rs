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

//! A `TransactionContext` over a plain `HashMap`, for unit tests that call the handler
//! directly without an executor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::handler::{ContextError, TransactionContext};
use crate::protocol::receipt::Event;

#[derive(Default)]
struct TestState {
    state: HashMap<String, Vec<u8>>,
    events: Vec<Event>,
}

#[derive(Default, Clone)]
pub struct TestContext {
    internal_state: Arc<Mutex<TestState>>,
}

impl TestContext {
    pub fn new() -> Self {
        TestContext::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.internal_state
            .lock()
            .expect("Test lock was poisoned in events method")
            .events
            .clone()
    }

    /// Number of entries currently set, used to check that a rejected action wrote
    /// nothing.
    pub fn len(&self) -> usize {
        self.internal_state
            .lock()
            .expect("Test lock was poisoned in len method")
            .state
            .len()
    }
}

impl TransactionContext for TestContext {
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let state = self
            .internal_state
            .lock()
            .expect("Test lock was poisoned in get method");
        Ok(addresses
            .iter()
            .filter_map(|address| {
                state
                    .state
                    .get(address)
                    .map(|value| (address.clone(), value.clone()))
            })
            .collect())
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        let mut state = self
            .internal_state
            .lock()
            .expect("Test lock was poisoned in set method");
        for (address, value) in entries {
            state.state.insert(address, value);
        }
        Ok(())
    }

    fn add_receipt_data(&self, _data: Vec<u8>) -> Result<(), ContextError> {
        Ok(())
    }

    fn add_event(
        &self,
        event_type: String,
        attributes: Vec<(String, String)>,
        data: Vec<u8>,
    ) -> Result<(), ContextError> {
        self.internal_state
            .lock()
            .expect("Test lock was poisoned in add_event method")
            .events
            .push(Event {
                event_type,
                attributes,
                data,
            });
        Ok(())
    }
}
