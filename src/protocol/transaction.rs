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

//! The transaction envelope submitted to the executor.
//!
//! A `TransactionRequest` names the family and version that should process it and carries an
//! opaque, family-specific payload. Signing and batching are left to the ledger runtime that
//! hosts the executor.

use std::error::Error as StdError;
use std::fmt;

use uuid::Uuid;

#[derive(Clone, PartialEq)]
pub struct TransactionRequest {
    transaction_id: String,
    family_name: String,
    family_version: String,
    signer: String,
    payload: Vec<u8>,
}

impl TransactionRequest {
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_version(&self) -> &str {
        &self.family_version
    }

    /// The identity that submitted the request, if the runtime supplied one.
    pub fn signer(&self) -> &str {
        &self.signer
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Debug for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TransactionRequest")
            .field("transaction_id", &self.transaction_id)
            .field("family_name", &self.family_name)
            .field("family_version", &self.family_version)
            .field("signer", &self.signer)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum TransactionRequestBuildError {
    MissingField(String),
    InvalidField(String),
}

impl StdError for TransactionRequestBuildError {}

impl fmt::Display for TransactionRequestBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransactionRequestBuildError::MissingField(ref s) => write!(f, "MissingField: {}", s),
            TransactionRequestBuildError::InvalidField(ref s) => write!(f, "InvalidField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct TransactionRequestBuilder {
    transaction_id: Option<String>,
    family_name: Option<String>,
    family_version: Option<String>,
    signer: Option<String>,
    payload: Option<Vec<u8>>,
}

impl TransactionRequestBuilder {
    pub fn new() -> Self {
        TransactionRequestBuilder::default()
    }

    pub fn with_transaction_id(mut self, transaction_id: String) -> TransactionRequestBuilder {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn with_family_name(mut self, family_name: String) -> TransactionRequestBuilder {
        self.family_name = Some(family_name);
        self
    }

    pub fn with_family_version(mut self, family_version: String) -> TransactionRequestBuilder {
        self.family_version = Some(family_version);
        self
    }

    pub fn with_signer(mut self, signer: String) -> TransactionRequestBuilder {
        self.signer = Some(signer);
        self
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> TransactionRequestBuilder {
        self.payload = Some(payload);
        self
    }

    pub fn build(self) -> Result<TransactionRequest, TransactionRequestBuildError> {
        let family_name = self.family_name.ok_or_else(|| {
            TransactionRequestBuildError::MissingField("'family_name' field is required".into())
        })?;
        let family_version = self.family_version.ok_or_else(|| {
            TransactionRequestBuildError::MissingField(
                "'family_version' field is required".into(),
            )
        })?;
        let payload = self.payload.ok_or_else(|| {
            TransactionRequestBuildError::MissingField("'payload' field is required".into())
        })?;

        Ok(TransactionRequest {
            transaction_id: self
                .transaction_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            family_name,
            family_version,
            signer: self.signer.unwrap_or_default(),
            payload,
        })
    }
}
