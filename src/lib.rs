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

//! Transaction processing for an academic paper submission and peer-review ledger.
//!
//! Authors publish papers, conferences solicit submissions, reviewers are allocated to
//! papers and paid in AcadCoin. The workflow lives in the `acad_review` transaction family;
//! the rest of the crate supplies the state, context and execution plumbing it runs on.

pub mod codec;
pub mod context;
pub mod execution;
pub mod families;
pub mod handler;
pub mod protocol;
pub mod state;

#[macro_use]
extern crate log;
