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

//! Typed access to acad_review entities in state.
//!
//! `AcadReviewState` is the repository the handlers work against. Inserts keep the
//! secondary indexes current, and every query answers from an index, returning entities in
//! the order they were inserted.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{FromBytes, IntoBytes};
use crate::handler::TransactionContext;
use crate::protocol::acad_review::{
    Academic, Account, Conference, Paper, PaperInfo, Review, ReviewRequest, Submission,
    SubmissionStatus,
};

use super::addressing::{
    make_academic_address, make_account_address, make_conference_address, make_index_address,
    make_paper_address, make_paper_info_address, make_review_address,
    make_review_request_address, make_submission_address, Index,
};
use super::error::ReviewError;

pub struct AcadReviewState<'a> {
    context: &'a dyn TransactionContext,
}

impl<'a> AcadReviewState<'a> {
    pub fn new(context: &'a dyn TransactionContext) -> AcadReviewState<'a> {
        AcadReviewState { context }
    }

    fn get_entity<T>(&self, address: &str) -> Result<Option<T>, ReviewError>
    where
        T: DeserializeOwned,
    {
        match self.context.get_state_entry(address)? {
            Some(bytes) => Ok(Some(T::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_entity<T>(&self, address: String, entity: &T) -> Result<(), ReviewError>
    where
        T: Serialize,
    {
        self.context.set_state_entry(address, entity.into_bytes()?)?;
        Ok(())
    }

    fn get_index(&self, index: Index, key: &str) -> Result<Vec<String>, ReviewError> {
        Ok(self
            .get_entity::<Vec<String>>(&make_index_address(index, key))?
            .unwrap_or_default())
    }

    fn append_index(&self, index: Index, key: &str, id: &str) -> Result<(), ReviewError> {
        let mut ids = self.get_index(index, key)?;
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
        self.set_entity(make_index_address(index, key), &ids)
    }

    /// Resolves every id of an index to its entity. An id whose entity is missing means
    /// the index and the entities have diverged.
    fn resolve<T, F>(&self, index: Index, key: &str, make: F) -> Result<Vec<T>, ReviewError>
    where
        T: DeserializeOwned,
        F: Fn(&str) -> String,
    {
        self.get_index(index, key)?
            .iter()
            .map(|id| {
                self.get_entity(&make(id.as_str()))?.ok_or_else(|| {
                    ReviewError::Internal(format!(
                        "Index {:?} for {} references missing entity {}",
                        index, key, id
                    ))
                })
            })
            .collect()
    }

    pub fn get_academic(&self, id: &str) -> Result<Option<Academic>, ReviewError> {
        self.get_entity(&make_academic_address(id))
    }

    pub fn set_academic(&self, academic: &Academic) -> Result<(), ReviewError> {
        self.set_entity(make_academic_address(academic.id()), academic)
    }

    pub fn get_paper(&self, id: &str) -> Result<Option<Paper>, ReviewError> {
        self.get_entity(&make_paper_address(id))
    }

    pub fn set_paper(&self, paper: &Paper) -> Result<(), ReviewError> {
        self.set_entity(make_paper_address(paper.id()), paper)
    }

    pub fn get_conference(&self, id: &str) -> Result<Option<Conference>, ReviewError> {
        self.get_entity(&make_conference_address(id))
    }

    pub fn set_conference(&self, conference: &Conference) -> Result<(), ReviewError> {
        self.set_entity(make_conference_address(conference.id()), conference)
    }

    pub fn add_paper_info(&self, paper_info: &PaperInfo) -> Result<(), ReviewError> {
        self.set_paper_info(paper_info)?;
        self.append_index(Index::PaperInfoByPaper, paper_info.paper(), paper_info.id())
    }

    pub fn set_paper_info(&self, paper_info: &PaperInfo) -> Result<(), ReviewError> {
        self.set_entity(make_paper_info_address(paper_info.id()), paper_info)
    }

    /// The paper info of a paper. There is at most one per paper.
    pub fn find_paper_info_by_paper(&self, paper: &str) -> Result<Option<PaperInfo>, ReviewError> {
        Ok(self
            .resolve(Index::PaperInfoByPaper, paper, make_paper_info_address)?
            .into_iter()
            .next())
    }

    pub fn get_submission(&self, id: &str) -> Result<Option<Submission>, ReviewError> {
        self.get_entity(&make_submission_address(id))
    }

    pub fn add_submission(&self, submission: &Submission) -> Result<(), ReviewError> {
        self.set_submission(submission)?;
        self.append_index(Index::SubmissionByPaper, submission.paper(), submission.id())?;
        self.append_index(
            Index::SubmissionByConference,
            submission.conference(),
            submission.id(),
        )
    }

    pub fn set_submission(&self, submission: &Submission) -> Result<(), ReviewError> {
        self.set_entity(make_submission_address(submission.id()), submission)
    }

    pub fn find_submissions_by_paper(&self, paper: &str) -> Result<Vec<Submission>, ReviewError> {
        self.resolve(Index::SubmissionByPaper, paper, make_submission_address)
    }

    pub fn find_submissions_by_conference(
        &self,
        conference: &str,
    ) -> Result<Vec<Submission>, ReviewError> {
        self.resolve(
            Index::SubmissionByConference,
            conference,
            make_submission_address,
        )
    }

    pub fn find_pending_submissions_by_conference(
        &self,
        conference: &str,
    ) -> Result<Vec<Submission>, ReviewError> {
        Ok(self
            .find_submissions_by_conference(conference)?
            .into_iter()
            .filter(|submission| submission.status() == SubmissionStatus::Pending)
            .collect())
    }

    pub fn add_review_request(&self, request: &ReviewRequest) -> Result<(), ReviewError> {
        self.set_entity(make_review_request_address(request.id()), request)?;
        self.append_index(
            Index::ReviewRequestByConference,
            request.conference(),
            request.id(),
        )
    }

    pub fn find_review_requests_by_conference(
        &self,
        conference: &str,
    ) -> Result<Vec<ReviewRequest>, ReviewError> {
        self.resolve(
            Index::ReviewRequestByConference,
            conference,
            make_review_request_address,
        )
    }

    pub fn find_review_request(
        &self,
        academic: &str,
        conference: &str,
    ) -> Result<Option<ReviewRequest>, ReviewError> {
        Ok(self
            .find_review_requests_by_conference(conference)?
            .into_iter()
            .find(|request| request.academic() == academic))
    }

    pub fn get_review(&self, id: &str) -> Result<Option<Review>, ReviewError> {
        self.get_entity(&make_review_address(id))
    }

    pub fn add_review(&self, review: &Review) -> Result<(), ReviewError> {
        self.set_review(review)?;
        self.append_index(Index::ReviewByAuthor, review.author(), review.id())?;
        self.append_index(Index::ReviewByPaper, review.paper(), review.id())
    }

    pub fn set_review(&self, review: &Review) -> Result<(), ReviewError> {
        self.set_entity(make_review_address(review.id()), review)
    }

    pub fn find_reviews_by_author(&self, author: &str) -> Result<Vec<Review>, ReviewError> {
        self.resolve(Index::ReviewByAuthor, author, make_review_address)
    }

    /// Reviews by the author that carry a rating.
    pub fn find_rated_reviews_by_author(&self, author: &str) -> Result<Vec<Review>, ReviewError> {
        Ok(self
            .find_reviews_by_author(author)?
            .into_iter()
            .filter(Review::is_rated)
            .collect())
    }

    pub fn find_reviews_by_paper(&self, paper: &str) -> Result<Vec<Review>, ReviewError> {
        self.resolve(Index::ReviewByPaper, paper, make_review_address)
    }

    /// AcadCoin balance of an identity. An identity without an account holds nothing.
    pub fn get_balance(&self, owner: &str) -> Result<u64, ReviewError> {
        Ok(self
            .get_entity::<Account>(&make_account_address(owner))?
            .map(|account| account.balance())
            .unwrap_or(0))
    }

    pub fn set_balance(&self, owner: &str, balance: u64) -> Result<(), ReviewError> {
        self.set_entity(
            make_account_address(owner),
            &Account::new(owner.to_string(), balance),
        )
    }

    /// Moves `amount` coins between two identities, leaving the total supply unchanged.
    pub fn transfer(&self, from: &str, to: &str, amount: u64) -> Result<(), ReviewError> {
        if from == to || amount == 0 {
            return Ok(());
        }

        let from_balance = self.get_balance(from)?;
        if from_balance < amount {
            return Err(ReviewError::InsufficientFunds(format!(
                "{} holds {} coins, {} needed",
                from, from_balance, amount
            )));
        }
        let to_balance = self.get_balance(to)?;
        let credited = to_balance.checked_add(amount).ok_or_else(|| {
            ReviewError::Internal(format!("Balance of {} would overflow", to))
        })?;

        self.set_balance(from, from_balance - amount)?;
        self.set_balance(to, credited)
    }
}
