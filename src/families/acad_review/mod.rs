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

//! The acad_review transaction family: paper submission, reviewer allocation and the
//! AcadCoin payments between them.
//!
//! Every action runs as a single transaction. When one is rejected the executor discards
//! everything it staged, so the actions below never undo partial work themselves.

pub mod addressing;
mod error;
mod genesis;
mod handler;
mod state;
#[cfg(test)]
mod test_context;
mod transaction_builder;

use uuid::Uuid;

pub use self::error::ReviewError;
pub use self::genesis::Genesis;
pub use self::handler::{AcadReviewTransactionHandler, DEFAULT_REVIEWER_RATING, FAMILY_VERSION};
pub use self::state::AcadReviewState;
pub use self::transaction_builder::AcadReviewTransactionBuilder;

/// Returns true if the two keyword lists share at least one keyword.
pub fn keywords_match(first: &[String], second: &[String]) -> bool {
    first.iter().any(|keyword| second.contains(keyword))
}

/// A fresh random id for an entity created by one of the actions.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
