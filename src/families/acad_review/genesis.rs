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

//! Initial ledger contents.
//!
//! Academics, papers, conferences and coin balances are created outside the workflow
//! actions. `Genesis` collects them and writes them through a `TransactionContext`, usually
//! via `Executor::seed`.

use std::collections::HashMap;

use crate::handler::{ApplyError, TransactionContext};
use crate::protocol::acad_review::{Academic, Conference, Paper, Review};

use super::error::ReviewError;
use super::state::AcadReviewState;

#[derive(Default, Clone)]
pub struct Genesis {
    academics: Vec<Academic>,
    papers: Vec<Paper>,
    conferences: Vec<Conference>,
    balances: Vec<(String, u64)>,
    reviews: Vec<Review>,
}

impl Genesis {
    pub fn new() -> Self {
        Genesis::default()
    }

    pub fn with_academic(mut self, academic: Academic) -> Self {
        self.academics.push(academic);
        self
    }

    pub fn with_paper(mut self, paper: Paper) -> Self {
        self.papers.push(paper);
        self
    }

    pub fn with_conference(mut self, conference: Conference) -> Self {
        self.conferences.push(conference);
        self
    }

    /// Mints `balance` coins for `owner`. Later entries for the same owner replace earlier
    /// ones.
    pub fn with_balance(mut self, owner: &str, balance: u64) -> Self {
        self.balances.push((owner.to_string(), balance));
        self
    }

    /// Adds an already completed review, carrying whatever rating it was given.
    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Total number of coins this genesis mints.
    pub fn supply(&self) -> u64 {
        self.balances
            .iter()
            .map(|(owner, balance)| (owner.as_str(), *balance))
            .collect::<HashMap<&str, u64>>()
            .values()
            .sum()
    }

    pub fn apply(&self, context: &dyn TransactionContext) -> Result<(), ApplyError> {
        let state = AcadReviewState::new(context);
        self.write(&state).map_err(ApplyError::from)
    }

    fn write(&self, state: &AcadReviewState) -> Result<(), ReviewError> {
        for academic in &self.academics {
            debug!("Genesis academic {}", academic.id());
            state.set_academic(academic)?;
        }
        for paper in &self.papers {
            debug!("Genesis paper {}", paper.id());
            state.set_paper(paper)?;
        }
        for conference in &self.conferences {
            debug!("Genesis conference {}", conference.id());
            state.set_conference(conference)?;
        }
        for (owner, balance) in &self.balances {
            state.set_balance(owner, *balance)?;
        }
        for review in &self.reviews {
            state.add_review(review)?;
        }
        Ok(())
    }
}
