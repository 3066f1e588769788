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

//! Running transaction handlers against state.
//!
//! The `Executor` gives each transaction its own `Context` staged on the current state id,
//! runs the matching `TransactionHandler` through an `ExecutionContext`, and only commits the
//! staged changes when the handler succeeds. A handler therefore never needs compensation
//! logic of its own: any error leaves state exactly as it was.

mod error;
mod executor;

use std::collections::HashMap;
use std::sync::Mutex;

pub use crate::execution::error::ExecutorError;
pub use crate::execution::executor::{Executor, PreparedTransaction};

use crate::context::Context;
use crate::handler::{ContextError, TransactionContext};
use crate::protocol::receipt::Event;
use crate::state::Read;

/// A reader over string-addressed, byte-valued state, borrowed for `'a`.
pub type StateReader<'a> = dyn Read<StateId = String, Key = String, Value = Vec<u8>> + 'a;

/// `TransactionContext` implementation that stages writes in a `Context` and reads through
/// to state at the context's base state id.
pub struct ExecutionContext<'a> {
    reader: &'a StateReader<'a>,
    context: Mutex<Context>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(reader: &'a StateReader<'a>, state_id: &str) -> Self {
        ExecutionContext {
            reader,
            context: Mutex::new(Context::new(state_id)),
        }
    }

    /// Consumes the execution context, returning everything the transaction staged.
    pub fn into_context(self) -> Context {
        self.context
            .into_inner()
            .unwrap_or_else(|err| err.into_inner())
    }
}

fn poisoned() -> ContextError {
    ContextError::TransactionReceiptError("Context lock was poisoned".into())
}

impl<'a> TransactionContext for ExecutionContext<'a> {
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let context = self.context.lock().map_err(|_| poisoned())?;

        let unstaged = addresses
            .iter()
            .filter(|address| !context.contains(address))
            .cloned()
            .collect::<Vec<String>>();
        let mut from_state: HashMap<String, Vec<u8>> = if unstaged.is_empty() {
            HashMap::new()
        } else {
            self.reader.get(context.state_id(), &unstaged)?
        };

        Ok(addresses
            .iter()
            .filter_map(|address| {
                if context.contains(address) {
                    context
                        .get_state(address)
                        .map(|value| (address.clone(), value.clone()))
                } else {
                    from_state
                        .remove(address)
                        .map(|value| (address.clone(), value))
                }
            })
            .collect())
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        let mut context = self.context.lock().map_err(|_| poisoned())?;
        for (address, value) in entries.into_iter() {
            context.set_state(address, value);
        }
        Ok(())
    }

    fn add_receipt_data(&self, data: Vec<u8>) -> Result<(), ContextError> {
        self.context
            .lock()
            .map_err(|_| poisoned())?
            .add_data(data);
        Ok(())
    }

    fn add_event(
        &self,
        event_type: String,
        attributes: Vec<(String, String)>,
        data: Vec<u8>,
    ) -> Result<(), ContextError> {
        self.context
            .lock()
            .map_err(|_| poisoned())?
            .add_event(Event {
                event_type,
                attributes,
                data,
            });
        Ok(())
    }
}
