// Copyright 2019 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversions between native types and the bytes stored in state or carried in payloads.

use std::error::Error as StdError;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug)]
pub enum CodecError {
    SerializationError(String),
    DeserializationError(String),
}

impl StdError for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CodecError::SerializationError(ref s) => write!(f, "SerializationError: {}", s),
            CodecError::DeserializationError(ref s) => write!(f, "DeserializationError: {}", s),
        }
    }
}

/// Reads a native value back out of its serialized form.
pub trait FromBytes<T>: Sized {
    fn from_bytes(bytes: &[u8]) -> Result<T, CodecError>;
}

/// Serializes a native value for storage in state or for use as a payload.
pub trait IntoBytes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, CodecError>;
}

impl<T> FromBytes<T> for T
where
    T: DeserializeOwned,
{
    fn from_bytes(bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|err| {
            CodecError::DeserializationError(format!(
                "Unable to get {} from bytes: {}",
                std::any::type_name::<T>(),
                err
            ))
        })
    }
}

impl<T> IntoBytes for T
where
    T: Serialize,
{
    fn into_bytes(self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&self).map_err(|err| {
            CodecError::SerializationError(format!(
                "Unable to get bytes from {}: {}",
                std::any::type_name::<T>(),
                err
            ))
        })
    }
}
