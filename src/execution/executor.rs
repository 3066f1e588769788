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

use std::sync::Mutex;

use crate::context::Context;
use crate::execution::error::ExecutorError;
use crate::execution::ExecutionContext;
use crate::handler::{ApplyError, TransactionContext, TransactionHandler};
use crate::protocol::receipt::{TransactionReceipt, TransactionReceiptBuilder};
use crate::protocol::transaction::TransactionRequest;
use crate::state::{self, Read, Write};

/// The outcome of running a transaction that has not been committed yet.
///
/// A prepared transaction remembers the state id it was run against. Committing it succeeds
/// only while that state id is still the executor's head.
#[derive(Debug)]
pub struct PreparedTransaction {
    base_state_id: String,
    receipt: TransactionReceipt,
    state_changes: Vec<state::StateChange>,
}

impl PreparedTransaction {
    pub fn base_state_id(&self) -> &str {
        &self.base_state_id
    }

    pub fn receipt(&self) -> &TransactionReceipt {
        &self.receipt
    }
}

/// Executes transactions one unit of work at a time on top of versioned state.
///
/// Each transaction gets a fresh `Context` on the current head. A handler that returns
/// `Ok` has its staged changes committed and the head advanced; any error discards the
/// context, so a rejected transaction leaves no trace in state.
pub struct Executor<S>
where
    S: Read<StateId = String, Key = String, Value = Vec<u8>>
        + Write<StateId = String, Key = String, Value = Vec<u8>>,
{
    state: S,
    handlers: Vec<Box<dyn TransactionHandler>>,
    head: Mutex<String>,
}

impl<S> Executor<S>
where
    S: Read<StateId = String, Key = String, Value = Vec<u8>>
        + Write<StateId = String, Key = String, Value = Vec<u8>>,
{
    /// Creates an executor whose head starts at `state_id`.
    pub fn new(state: S, state_id: String, handlers: Vec<Box<dyn TransactionHandler>>) -> Self {
        Executor {
            state,
            handlers,
            head: Mutex::new(state_id),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// The state id of the most recently committed transaction.
    pub fn state_id(&self) -> Result<String, ExecutorError> {
        self.head
            .lock()
            .map(|head| head.clone())
            .map_err(|_| ExecutorError::InternalError("Head lock was poisoned".into()))
    }

    /// Returns a context over the current head, for reading committed state.
    ///
    /// Anything written to the returned context is never committed.
    pub fn snapshot(&self) -> Result<ExecutionContext<'_>, ExecutorError> {
        let state_id = self.state_id()?;
        Ok(ExecutionContext::new(&self.state, &state_id))
    }

    /// Runs the transaction and commits its result in one step.
    pub fn execute(&self, request: &TransactionRequest) -> Result<TransactionReceipt, ExecutorError> {
        let prepared = self.prepare(request)?;
        self.commit(prepared)
    }

    /// Runs the transaction against the current head without committing it.
    ///
    /// # Errors
    ///
    /// Returns an `ExecutorError` if the handler fails internally or state cannot be read.
    /// Invalid transactions are not errors; they produce an invalid receipt.
    pub fn prepare(&self, request: &TransactionRequest) -> Result<PreparedTransaction, ExecutorError> {
        let base_state_id = self.state_id()?;

        let handler = match self.find_handler(request) {
            Some(handler) => handler,
            None => {
                warn!(
                    "Unable to route transaction {}: no handler for {} {}",
                    request.transaction_id(),
                    request.family_name(),
                    request.family_version()
                );
                let receipt = TransactionReceiptBuilder::new()
                    .invalid()
                    .with_transaction_id(request.transaction_id().to_string())
                    .with_error_message(format!(
                        "No handler registered for family {} version {}",
                        request.family_name(),
                        request.family_version()
                    ))
                    .build()?;
                return Ok(PreparedTransaction {
                    base_state_id,
                    receipt,
                    state_changes: vec![],
                });
            }
        };

        debug!("Executing {:?} on state {}", request, base_state_id);
        let mut execution_context = ExecutionContext::new(&self.state, &base_state_id);
        match handler.apply(request, &mut execution_context) {
            Ok(()) => {
                let context = execution_context.into_context();
                let receipt = valid_receipt(request.transaction_id(), &context)?;
                let state_changes = context
                    .squashed_state_changes()
                    .into_iter()
                    .map(state::StateChange::from)
                    .collect();
                Ok(PreparedTransaction {
                    base_state_id,
                    receipt,
                    state_changes,
                })
            }
            Err(ApplyError::InvalidTransaction(error_message)) => {
                debug!(
                    "Transaction {} is invalid: {}",
                    request.transaction_id(),
                    error_message
                );
                let receipt = TransactionReceiptBuilder::new()
                    .invalid()
                    .with_transaction_id(request.transaction_id().to_string())
                    .with_error_message(error_message)
                    .build()?;
                Ok(PreparedTransaction {
                    base_state_id,
                    receipt,
                    state_changes: vec![],
                })
            }
            Err(ApplyError::InternalError(msg)) => {
                error!(
                    "Internal error while executing {}: {}",
                    request.transaction_id(),
                    msg
                );
                Err(ExecutorError::InternalError(msg))
            }
        }
    }

    /// Commits a prepared transaction if the head has not moved since it was prepared.
    ///
    /// Invalid receipts are returned as-is without touching state.
    ///
    /// # Errors
    ///
    /// `ExecutorError::StateConflict` if another commit advanced the head first.
    pub fn commit(&self, prepared: PreparedTransaction) -> Result<TransactionReceipt, ExecutorError> {
        if !prepared.receipt.is_valid() {
            return Ok(prepared.receipt);
        }

        self.commit_changes(&prepared.base_state_id, &prepared.state_changes)?;
        Ok(prepared.receipt)
    }

    /// Commits entities created outside of any transaction family, such as the academics,
    /// papers, conferences and balances a ledger starts with.
    ///
    /// The genesis closure writes through a context exactly like a handler would. Returns
    /// the new head state id.
    pub fn seed<F>(&self, genesis: F) -> Result<String, ExecutorError>
    where
        F: FnOnce(&dyn TransactionContext) -> Result<(), ApplyError>,
    {
        let base_state_id = self.state_id()?;
        let execution_context = ExecutionContext::new(&self.state, &base_state_id);
        genesis(&execution_context).map_err(|err| ExecutorError::InvalidGenesis(err.to_string()))?;

        let state_changes = execution_context
            .into_context()
            .squashed_state_changes()
            .into_iter()
            .map(state::StateChange::from)
            .collect::<Vec<_>>();
        self.commit_changes(&base_state_id, &state_changes)
    }

    fn find_handler(&self, request: &TransactionRequest) -> Option<&dyn TransactionHandler> {
        self.handlers
            .iter()
            .find(|handler| {
                handler.family_name() == request.family_name()
                    && handler
                        .family_versions()
                        .iter()
                        .any(|v| v == request.family_version())
            })
            .map(|handler| handler.as_ref())
    }

    fn commit_changes(
        &self,
        base_state_id: &str,
        state_changes: &[state::StateChange],
    ) -> Result<String, ExecutorError> {
        let mut head = self
            .head
            .lock()
            .map_err(|_| ExecutorError::InternalError("Head lock was poisoned".into()))?;

        if *head != base_state_id {
            return Err(ExecutorError::StateConflict {
                expected: base_state_id.to_string(),
                actual: head.clone(),
            });
        }

        let next_state_id = self.state.commit(&head, state_changes)?;
        debug!(
            "Committed {} state changes: {} -> {}",
            state_changes.len(),
            *head,
            next_state_id
        );
        *head = next_state_id.clone();
        Ok(next_state_id)
    }
}

fn valid_receipt(transaction_id: &str, context: &Context) -> Result<TransactionReceipt, ExecutorError> {
    Ok(TransactionReceiptBuilder::new()
        .valid()
        .with_transaction_id(transaction_id.to_string())
        .with_state_changes(context.squashed_state_changes())
        .with_events(context.events().clone())
        .with_data(context.data().clone())
        .build()?)
}
