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

use std::error::Error;
use std::fmt;

/// Returned when a set of changes cannot be committed.
#[derive(Debug)]
pub enum StateWriteError {
    /// The changes were based on a state id the store never produced
    UnknownStateId(String),
    /// The store itself failed, e.g. its lock was poisoned by a panicking writer
    StorageError(String),
}

impl fmt::Display for StateWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateWriteError::UnknownStateId(state_id) => {
                write!(f, "Cannot commit on top of unknown state {}", state_id)
            }
            StateWriteError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl Error for StateWriteError {}

/// Returned when entries cannot be read at a state id.
#[derive(Debug)]
pub enum StateReadError {
    UnknownStateId(String),
    StorageError(String),
}

impl fmt::Display for StateReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateReadError::UnknownStateId(state_id) => {
                write!(f, "Cannot read from unknown state {}", state_id)
            }
            StateReadError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl Error for StateReadError {}
