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

use std::error::Error;
use std::fmt;

use crate::protocol::receipt::TransactionReceiptBuilderError;
use crate::state::{StateReadError, StateWriteError};

#[derive(Debug)]
pub enum ExecutorError {
    /// The head state id moved between preparing a transaction and committing it. The
    /// prepared result has been discarded and the transaction must be resubmitted.
    StateConflict { expected: String, actual: String },
    StateReadError(StateReadError),
    StateWriteError(StateWriteError),
    /// A handler failed for a reason unrelated to the validity of the transaction.
    InternalError(String),
    /// The genesis closure passed to `Executor::seed` rejected its input.
    InvalidGenesis(String),
    ReceiptBuildError(TransactionReceiptBuilderError),
}

impl Error for ExecutorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExecutorError::StateReadError(err) => Some(err),
            ExecutorError::StateWriteError(err) => Some(err),
            ExecutorError::ReceiptBuildError(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutorError::StateConflict { expected, actual } => write!(
                f,
                "State conflict: transaction ran against {} but head is {}",
                expected, actual
            ),
            ExecutorError::StateReadError(err) => write!(f, "Unable to read state: {}", err),
            ExecutorError::StateWriteError(err) => write!(f, "Unable to write state: {}", err),
            ExecutorError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ExecutorError::InvalidGenesis(msg) => write!(f, "Invalid genesis: {}", msg),
            ExecutorError::ReceiptBuildError(err) => {
                write!(f, "Unable to build receipt: {}", err)
            }
        }
    }
}

impl From<StateReadError> for ExecutorError {
    fn from(err: StateReadError) -> Self {
        ExecutorError::StateReadError(err)
    }
}

impl From<StateWriteError> for ExecutorError {
    fn from(err: StateWriteError) -> Self {
        ExecutorError::StateWriteError(err)
    }
}

impl From<TransactionReceiptBuilderError> for ExecutorError {
    fn from(err: TransactionReceiptBuilderError) -> Self {
        ExecutorError::ReceiptBuildError(err)
    }
}
