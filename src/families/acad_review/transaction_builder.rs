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

use crate::codec::IntoBytes;
use crate::protocol::acad_review::AcadReviewPayload;
use crate::protocol::transaction::{
    TransactionRequest, TransactionRequestBuildError, TransactionRequestBuilder,
};

use super::addressing::FAMILY_NAME;
use super::handler::FAMILY_VERSION;

/// Builds an `acad_review` transaction request around a single payload
#[derive(Default)]
pub struct AcadReviewTransactionBuilder {
    payload: Option<AcadReviewPayload>,
    signer: Option<String>,
}

impl AcadReviewTransactionBuilder {
    /// Create a new [AcadReviewTransactionBuilder]
    pub fn new() -> Self {
        AcadReviewTransactionBuilder::default()
    }

    /// Set the action the transaction performs
    pub fn with_payload(mut self, payload: AcadReviewPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the identity submitting the transaction
    pub fn with_signer(mut self, signer: String) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Create a `TransactionRequestBuilder` with the family, version and encoded payload
    /// filled in
    pub fn into_request_builder(self) -> Result<TransactionRequestBuilder, TransactionRequestBuildError> {
        let payload = self.payload.ok_or_else(|| {
            TransactionRequestBuildError::MissingField("'payload' field is required".to_string())
        })?;
        let payload_bytes = payload.into_bytes().map_err(|err| {
            TransactionRequestBuildError::InvalidField(format!(
                "'payload' could not be encoded: {}",
                err
            ))
        })?;

        let builder = TransactionRequestBuilder::new()
            .with_family_name(FAMILY_NAME.to_string())
            .with_family_version(FAMILY_VERSION.to_string())
            .with_payload(payload_bytes);

        Ok(match self.signer {
            Some(signer) => builder.with_signer(signer),
            None => builder,
        })
    }

    pub fn build(self) -> Result<TransactionRequest, TransactionRequestBuildError> {
        self.into_request_builder()?.build()
    }
}
