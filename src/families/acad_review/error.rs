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

use crate::codec::CodecError;
use crate::handler::{ApplyError, ContextError};

/// Reasons a review workflow action is rejected.
///
/// Every variant except `Internal` marks the transaction invalid. `Internal` covers state
/// or encoding failures that say nothing about the transaction itself.
#[derive(Debug)]
pub enum ReviewError {
    DuplicateEntity(String),
    NotFound(String),
    PreconditionFailed(String),
    AlreadyExists(String),
    InsufficientFunds(String),
    InvalidState(String),
    NoMatch(String),
    ConflictOfInterest(String),
    AlreadySubmitted(String),
    InsufficientSubmissions(String),
    InsufficientReviewers(String),
    InvalidArgument(String),
    Internal(String),
}

impl ReviewError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::DuplicateEntity(_) => "DuplicateEntity",
            ReviewError::NotFound(_) => "NotFound",
            ReviewError::PreconditionFailed(_) => "PreconditionFailed",
            ReviewError::AlreadyExists(_) => "AlreadyExists",
            ReviewError::InsufficientFunds(_) => "InsufficientFunds",
            ReviewError::InvalidState(_) => "InvalidState",
            ReviewError::NoMatch(_) => "NoMatch",
            ReviewError::ConflictOfInterest(_) => "ConflictOfInterest",
            ReviewError::AlreadySubmitted(_) => "AlreadySubmitted",
            ReviewError::InsufficientSubmissions(_) => "InsufficientSubmissions",
            ReviewError::InsufficientReviewers(_) => "InsufficientReviewers",
            ReviewError::InvalidArgument(_) => "InvalidArgument",
            ReviewError::Internal(_) => "Internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ReviewError::DuplicateEntity(msg)
            | ReviewError::NotFound(msg)
            | ReviewError::PreconditionFailed(msg)
            | ReviewError::AlreadyExists(msg)
            | ReviewError::InsufficientFunds(msg)
            | ReviewError::InvalidState(msg)
            | ReviewError::NoMatch(msg)
            | ReviewError::ConflictOfInterest(msg)
            | ReviewError::AlreadySubmitted(msg)
            | ReviewError::InsufficientSubmissions(msg)
            | ReviewError::InsufficientReviewers(msg)
            | ReviewError::InvalidArgument(msg)
            | ReviewError::Internal(msg) => msg,
        }
    }
}

impl Error for ReviewError {}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl From<ContextError> for ReviewError {
    fn from(err: ContextError) -> Self {
        ReviewError::Internal(err.to_string())
    }
}

impl From<CodecError> for ReviewError {
    fn from(err: CodecError) -> Self {
        ReviewError::Internal(err.to_string())
    }
}

impl From<ReviewError> for ApplyError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Internal(msg) => ApplyError::InternalError(msg),
            _ => ApplyError::InvalidTransaction(err.to_string()),
        }
    }
}
