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

//! Traits for handling the execution of a transaction.
//!
//! A `TransactionHandler` implements one transaction family. It holds no state of its own:
//! everything it reads or writes goes through the `TransactionContext` it is handed, which
//! stages the writes until the executor decides whether to keep them.

mod error;

pub use crate::handler::error::{ApplyError, ContextError};
use crate::protocol::transaction::TransactionRequest;

/// State access for a single transaction.
///
/// Reads see the transaction's own staged writes on top of the state it started from. Nothing
/// becomes visible to other transactions until the executor commits.
pub trait TransactionContext {
    /// Returns the value at `address`, if set.
    fn get_state_entry(&self, address: &str) -> Result<Option<Vec<u8>>, ContextError> {
        Ok(self
            .get_state_entries(&[address.to_string()])?
            .into_iter()
            .map(|(_, val)| val)
            .next())
    }

    /// Returns the `(address, value)` pairs for the addresses that are set. Unset addresses
    /// are left out.
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError>;

    fn set_state_entry(&self, address: String, data: Vec<u8>) -> Result<(), ContextError> {
        self.set_state_entries(vec![(address, data)])
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError>;

    /// Appends opaque family data to the receipt.
    fn add_receipt_data(&self, data: Vec<u8>) -> Result<(), ContextError>;

    /// Records an event on the receipt.
    ///
    /// # Arguments
    ///
    /// * `event_type` - what happened, e.g. "acad_review/submission_created"
    /// * `attributes` - key/value pairs subscribers can filter on, usually the affected ids
    /// * `data` - opaque to the executor
    fn add_event(
        &self,
        event_type: String,
        attributes: Vec<(String, String)>,
        data: Vec<u8>,
    ) -> Result<(), ContextError>;
}

pub trait TransactionHandler: Send {
    /// The transaction family this handler processes, e.g. "acad_review"
    fn family_name(&self) -> &str;

    /// The family versions this handler accepts, e.g. ["1.0"]
    fn family_versions(&self) -> &[String];

    /// Runs the business logic of the family against `context`.
    ///
    /// Returning an error discards everything written to the context.
    fn apply(
        &self,
        request: &TransactionRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError>;
}
