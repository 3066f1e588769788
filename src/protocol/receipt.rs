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

use std::error::Error as StdError;
use std::fmt;

use crate::state;

/// A key set to a value by a transaction. The family only ever writes entities and index
/// records, it never removes them.
#[derive(Clone, Eq, Hash, PartialEq)]
pub enum StateChange {
    Set { key: String, value: Vec<u8> },
}

impl StateChange {
    pub fn key(&self) -> &str {
        match self {
            StateChange::Set { key, .. } => key,
        }
    }

    pub fn has_key(&self, k: &str) -> bool {
        self.key() == k
    }
}

impl From<StateChange> for state::StateChange {
    fn from(state_change: StateChange) -> Self {
        match state_change {
            StateChange::Set { key, value } => state::StateChange::Set { key, value },
        }
    }
}

impl fmt::Debug for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateChange::Set { key, value } => f
                .debug_struct("Set")
                .field("key", key)
                .field("value_len", &value.len())
                .finish(),
        }
    }
}

/// A `TransactionResult` contains either the valid or invalid result of the transaction.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub enum TransactionResult {
    Valid {
        /// Updates to state that were generated by the transaction.
        state_changes: Vec<StateChange>,
        /// Events fired by this transaction.
        events: Vec<Event>,
        /// Transaction family defined data.
        data: Vec<Vec<u8>>,
    },
    Invalid {
        /// "<Kind>: <reason>" for family errors
        error_message: String,
    },
}

/// A `TransactionReceipt` is produced as a result of executing a transaction.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_id: String,
    pub transaction_result: TransactionResult,
}

impl TransactionReceipt {
    pub fn is_valid(&self) -> bool {
        matches!(self.transaction_result, TransactionResult::Valid { .. })
    }

    /// Returns the events fired by a valid transaction; invalid transactions fire none.
    pub fn events(&self) -> &[Event] {
        match &self.transaction_result {
            TransactionResult::Valid { events, .. } => events,
            TransactionResult::Invalid { .. } => &[],
        }
    }
}

/// An `Event` is metadata about a transaction's processing. Events are reported on the
/// receipt but are not saved to state.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Event {
    /// A human readable string that identifies this event
    pub event_type: String,
    /// Human readable information about the transaction.
    pub attributes: Vec<(String, String)>,
    /// Opaque data, about the transaction, that the client can deserialize
    pub data: Vec<u8>,
}

impl Event {
    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
pub enum TransactionReceiptBuilderError {
    MissingField(String),
}

impl StdError for TransactionReceiptBuilderError {}

impl std::fmt::Display for TransactionReceiptBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            TransactionReceiptBuilderError::MissingField(ref s) => write!(f, "MissingField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct TransactionReceiptBuilder {
    is_valid: bool,
    state_changes: Vec<StateChange>,
    events: Vec<Event>,
    data: Vec<Vec<u8>>,
    error_message: String,
    transaction_id: Option<String>,
}

impl TransactionReceiptBuilder {
    pub fn new() -> Self {
        TransactionReceiptBuilder::default()
    }

    pub fn valid(mut self) -> Self {
        self.is_valid = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.is_valid = false;
        self
    }

    pub fn with_state_changes(
        mut self,
        state_changes: Vec<StateChange>,
    ) -> TransactionReceiptBuilder {
        self.state_changes = state_changes;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> TransactionReceiptBuilder {
        self.events = events;
        self
    }

    pub fn with_data(mut self, data: Vec<Vec<u8>>) -> TransactionReceiptBuilder {
        self.data = data;
        self
    }

    pub fn with_error_message(mut self, error_message: String) -> TransactionReceiptBuilder {
        self.error_message = error_message;
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: String) -> TransactionReceiptBuilder {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn build(self) -> Result<TransactionReceipt, TransactionReceiptBuilderError> {
        let transaction_id = self.transaction_id.ok_or_else(|| {
            TransactionReceiptBuilderError::MissingField(
                "'transaction_id' field is required".to_string(),
            )
        })?;

        let transaction_result = if self.is_valid {
            TransactionResult::Valid {
                state_changes: self.state_changes,
                events: self.events,
                data: self.data,
            }
        } else {
            TransactionResult::Invalid {
                error_message: self.error_message,
            }
        };

        Ok(TransactionReceipt {
            transaction_id,
            transaction_result,
        })
    }
}
