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

use std::convert::TryFrom;

use crate::codec::FromBytes;
use crate::handler::{ApplyError, TransactionContext, TransactionHandler};
use crate::protocol::acad_review::{
    AcadReviewPayload, Academic, AllocatePapersAction, AssessPaperAction, Conference,
    ConferenceStatus, CreatePaperInfoAction, Paper, PaperInfo, PublishState, RequestReviewAction,
    Review, ReviewRequest, ReviewStatus, Submission, SubmissionStatus, SubmitPaperAction,
    SubmitReviewAction, SubscribePaperAction,
};
use crate::protocol::transaction::TransactionRequest;

use super::addressing::{get_acad_review_prefix, FAMILY_NAME};
use super::error::ReviewError;
use super::state::AcadReviewState;
use super::{keywords_match, new_entity_id};

pub const FAMILY_VERSION: &str = "1.0";

/// Rating assumed for an academic who has no rated reviews yet.
pub const DEFAULT_REVIEWER_RATING: f64 = 5.0;

pub struct AcadReviewTransactionHandler {
    family_name: String,
    family_versions: Vec<String>,
    namespaces: Vec<String>,
    default_rating: f64,
}

impl AcadReviewTransactionHandler {
    #[allow(clippy::new_without_default)]
    pub fn new() -> AcadReviewTransactionHandler {
        AcadReviewTransactionHandler {
            family_name: FAMILY_NAME.to_string(),
            family_versions: vec![FAMILY_VERSION.to_string()],
            namespaces: vec![get_acad_review_prefix()],
            default_rating: DEFAULT_REVIEWER_RATING,
        }
    }

    /// Overrides the rating given to academics with no rated reviews.
    pub fn with_default_rating(mut self, default_rating: f64) -> Self {
        self.default_rating = default_rating;
        self
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.namespaces.clone()
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }
}

impl TransactionHandler for AcadReviewTransactionHandler {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn family_versions(&self) -> &[String] {
        &self.family_versions
    }

    fn apply(
        &self,
        request: &TransactionRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let payload = unpack_payload(request.payload())?;
        let action = payload.action();
        debug!(
            "acad_review txn {}: action {}",
            request.transaction_id(),
            action
        );

        let context: &dyn TransactionContext = context;
        let result = match &payload {
            AcadReviewPayload::CreatePaperInfo(data) => apply_create_paper_info(data, context),
            AcadReviewPayload::SubscribePaper(data) => apply_subscribe_paper(data, context),
            AcadReviewPayload::SubmitPaper(data) => apply_submit_paper(data, context),
            AcadReviewPayload::RequestReview(data) => {
                apply_request_review(data, self.default_rating, context)
            }
            AcadReviewPayload::AllocatePapers(data) => apply_allocate_papers(data, context),
            AcadReviewPayload::SubmitReview(data) => apply_submit_review(data, context),
            AcadReviewPayload::AssessPaper(data) => apply_assess_paper(data, context),
        };

        result.map_err(|err| {
            match err {
                ReviewError::Internal(ref msg) => {
                    error!("Internal error: during {}, {}", action, msg)
                }
                _ => warn!("Invalid transaction: during {}, {}", action, err),
            }
            ApplyError::from(err)
        })
    }
}

fn unpack_payload(payload: &[u8]) -> Result<AcadReviewPayload, ApplyError> {
    AcadReviewPayload::from_bytes(payload).map_err(|err| {
        warn!(
            "Invalid transaction: Failed to unmarshal AcadReviewPayload: {}",
            err
        );
        ApplyError::from(ReviewError::InvalidArgument(format!(
            "Failed to unmarshal AcadReviewPayload: {}",
            err
        )))
    })
}

fn emit(
    context: &dyn TransactionContext,
    event_type: &str,
    attributes: &[(&str, &str)],
) -> Result<(), ReviewError> {
    context.add_event(
        format!("{}/{}", FAMILY_NAME, event_type),
        attributes
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        vec![],
    )?;
    Ok(())
}

fn load_academic(state: &AcadReviewState, id: &str) -> Result<Academic, ReviewError> {
    state
        .get_academic(id)?
        .ok_or_else(|| ReviewError::NotFound(format!("Academic {} does not exist", id)))
}

fn load_paper(state: &AcadReviewState, id: &str) -> Result<Paper, ReviewError> {
    state
        .get_paper(id)?
        .ok_or_else(|| ReviewError::NotFound(format!("Paper {} does not exist", id)))
}

fn load_conference(state: &AcadReviewState, id: &str) -> Result<Conference, ReviewError> {
    state
        .get_conference(id)?
        .ok_or_else(|| ReviewError::NotFound(format!("Conference {} does not exist", id)))
}

fn load_submission(state: &AcadReviewState, id: &str) -> Result<Submission, ReviewError> {
    state
        .get_submission(id)?
        .ok_or_else(|| ReviewError::NotFound(format!("Submission {} does not exist", id)))
}

fn load_review(state: &AcadReviewState, id: &str) -> Result<Review, ReviewError> {
    state
        .get_review(id)?
        .ok_or_else(|| ReviewError::NotFound(format!("Review {} does not exist", id)))
}

fn load_paper_info(state: &AcadReviewState, paper: &str) -> Result<PaperInfo, ReviewError> {
    state.find_paper_info_by_paper(paper)?.ok_or_else(|| {
        ReviewError::NotFound(format!("No paper info found for paper {}", paper))
    })
}

fn apply_create_paper_info(
    data: &CreatePaperInfoAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let paper = load_paper(&state, data.paper())?;

    if state.find_paper_info_by_paper(paper.id())?.is_some() {
        return Err(ReviewError::DuplicateEntity(format!(
            "PaperInfo exists for paper {}",
            paper.id()
        )));
    }

    let mut paper_info = PaperInfo::new(
        new_entity_id(),
        paper.id().to_string(),
        data.ipfs_hash().to_string(),
        data.decrypt_key().to_string(),
    );
    paper_info.add_user(paper.owner());
    state.add_paper_info(&paper_info)?;

    emit(
        context,
        "paper_info_created",
        &[("paper_info", paper_info.id()), ("paper", paper.id())],
    )
}

fn apply_subscribe_paper(
    data: &SubscribePaperAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let paper = load_paper(&state, data.paper())?;
    let new_user = load_academic(&state, data.new_user())?;

    let mut paper_info = load_paper_info(&state, paper.id())?;

    let published = state
        .find_submissions_by_paper(paper.id())?
        .iter()
        .any(|submission| submission.status() == SubmissionStatus::Pass);
    if !published {
        return Err(ReviewError::PreconditionFailed(format!(
            "Paper {} is not published",
            paper.id()
        )));
    }

    if paper_info.has_user(new_user.id()) {
        return Err(ReviewError::AlreadyExists(format!(
            "{} is already subscribed to paper {}",
            new_user.id(),
            paper.id()
        )));
    }

    let balance = state.get_balance(new_user.id())?;
    if balance < paper.acad_coin_num() {
        return Err(ReviewError::InsufficientFunds(format!(
            "{} holds {} coins, paper {} costs {}",
            new_user.id(),
            balance,
            paper.id(),
            paper.acad_coin_num()
        )));
    }

    state.transfer(new_user.id(), paper.owner(), paper.acad_coin_num())?;
    paper_info.add_user(new_user.id());
    state.set_paper_info(&paper_info)?;

    emit(
        context,
        "paper_subscribed",
        &[
            ("paper", paper.id()),
            ("user", new_user.id()),
            ("payment", paper.acad_coin_num().to_string().as_str()),
        ],
    )
}

fn apply_submit_paper(
    data: &SubmitPaperAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let mut paper = load_paper(&state, data.paper())?;
    let conference = load_conference(&state, data.conference())?;

    let submissions = state.find_submissions_by_paper(paper.id())?;
    let active_submission = submissions
        .iter()
        .any(|submission| submission.status() != SubmissionStatus::Fail);

    if paper.published() != PublishState::NotPub {
        // a paper under review by its own live submission is a repeat submit
        if paper.published() == PublishState::Submitted && active_submission {
            return Err(ReviewError::AlreadySubmitted(format!(
                "Paper {} is already submitted",
                paper.id()
            )));
        }
        return Err(ReviewError::InvalidState(format!(
            "Paper {} cannot be submitted while {:?}",
            paper.id(),
            paper.published()
        )));
    }

    if conference.con_status() != ConferenceStatus::Open {
        return Err(ReviewError::InvalidState(format!(
            "Conference {} stopped accepting papers",
            conference.id()
        )));
    }

    if !keywords_match(paper.keywords(), conference.keywords()) {
        return Err(ReviewError::NoMatch(format!(
            "Paper {} doesn't match with conference {}",
            paper.id(),
            conference.id()
        )));
    }

    let mut paper_info = load_paper_info(&state, paper.id())?;

    for academic in std::iter::once(paper.owner()).chain(paper.authors().iter().map(String::as_str))
    {
        if state
            .find_review_request(academic, conference.id())?
            .is_some()
        {
            return Err(ReviewError::ConflictOfInterest(format!(
                "{} already exists as a potential reviewer for conference {}",
                academic,
                conference.id()
            )));
        }
    }

    if active_submission {
        return Err(ReviewError::AlreadySubmitted(format!(
            "Paper {} is already submitted or published",
            paper.id()
        )));
    }

    let submission = Submission::new(
        new_entity_id(),
        paper.id().to_string(),
        conference.id().to_string(),
    );
    state.add_submission(&submission)?;

    if paper_info.add_user(conference.publisher()) {
        state.set_paper_info(&paper_info)?;
    }

    paper.set_published(PublishState::Submitted);
    state.set_paper(&paper)?;

    emit(
        context,
        "submission_created",
        &[
            ("submission", submission.id()),
            ("paper", paper.id()),
            ("conference", conference.id()),
        ],
    )
}

/// Mean rating over the academic's rated reviews, or `default_rating` if there are none.
fn reviewer_rating(
    state: &AcadReviewState,
    academic: &str,
    default_rating: f64,
) -> Result<f64, ReviewError> {
    let reviews = state.find_rated_reviews_by_author(academic)?;
    if reviews.is_empty() {
        return Ok(default_rating);
    }
    let sum: f64 = reviews.iter().map(Review::rating).sum();
    Ok(sum / reviews.len() as f64)
}

fn apply_request_review(
    data: &RequestReviewAction,
    default_rating: f64,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let academic = load_academic(&state, data.academic())?;
    let conference = load_conference(&state, data.conference())?;

    if !keywords_match(academic.interest(), conference.keywords()) {
        return Err(ReviewError::NoMatch(format!(
            "Interest of {} doesn't match with conference {}",
            academic.id(),
            conference.id()
        )));
    }

    let rating = reviewer_rating(&state, academic.id(), default_rating)?;
    if rating < conference.reviewer_rating() {
        return Err(ReviewError::PreconditionFailed(format!(
            "Reviewer rating {} of {} is lower than the {} required by conference {}",
            rating,
            academic.id(),
            conference.reviewer_rating(),
            conference.id()
        )));
    }

    for submission in state.find_submissions_by_conference(conference.id())? {
        let paper = load_paper(&state, submission.paper())?;
        if paper.is_owned_or_authored_by(academic.id()) {
            return Err(ReviewError::ConflictOfInterest(format!(
                "{} is an owner or author of submitted paper {}",
                academic.id(),
                paper.id()
            )));
        }
    }

    if state
        .find_review_request(academic.id(), conference.id())?
        .is_some()
    {
        return Err(ReviewError::AlreadyExists(format!(
            "{} already requested to review for conference {}",
            academic.id(),
            conference.id()
        )));
    }

    let request = ReviewRequest::new(
        new_entity_id(),
        academic.id().to_string(),
        conference.id().to_string(),
        conference.payment(),
    );
    state.add_review_request(&request)?;

    emit(
        context,
        "review_request_created",
        &[
            ("review_request", request.id()),
            ("academic", academic.id()),
            ("conference", conference.id()),
        ],
    )
}

fn apply_allocate_papers(
    data: &AllocatePapersAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let conference = load_conference(&state, data.conference())?;
    let publisher = conference.publisher();

    if data.review_per_paper() < 1 {
        return Err(ReviewError::InvalidArgument(
            "There need to be at least one reviewer to review a paper".into(),
        ));
    }
    let review_per_paper = usize::try_from(data.review_per_paper())
        .map_err(|_| ReviewError::InvalidArgument("reviewPerPaper is too large".into()))?;

    let balance = state.get_balance(publisher)?;
    let max_coins = if data.max_coins() <= 0 {
        balance
    } else {
        data.max_coins() as u64
    };
    if balance < max_coins {
        return Err(ReviewError::InsufficientFunds(format!(
            "Publisher {} holds {} coins, {} offered",
            publisher, balance, max_coins
        )));
    }

    let requests = state.find_review_requests_by_conference(conference.id())?;
    let submissions = state.find_pending_submissions_by_conference(conference.id())?;
    let paper_num = usize::try_from(conference.paper_num()).map_err(|_| {
        ReviewError::Internal(format!(
            "paperNum of conference {} does not fit in memory",
            conference.id()
        ))
    })?;

    if submissions.len() < paper_num {
        return Err(ReviewError::InsufficientSubmissions(format!(
            "Conference {} has {} pending submissions, {} required",
            conference.id(),
            submissions.len(),
            paper_num
        )));
    }

    let slots = review_per_paper
        .checked_mul(paper_num)
        .ok_or_else(|| ReviewError::InvalidArgument("reviewPerPaper is too large".into()))?;
    if slots > requests.len() {
        return Err(ReviewError::InsufficientReviewers(format!(
            "Conference {} has {} review requests, {} required",
            conference.id(),
            requests.len(),
            slots
        )));
    }

    let mut pool = max_coins;
    for k in 0..review_per_paper {
        for (l, submission) in submissions.iter().take(paper_num).enumerate() {
            let request = &requests[k * paper_num + l];

            let review = Review::new(
                new_entity_id(),
                publisher.to_string(),
                request.academic().to_string(),
                submission.paper().to_string(),
                conference.id().to_string(),
            );
            state.add_review(&review)?;

            let mut paper_info = load_paper_info(&state, submission.paper())?;
            if paper_info.add_user(request.academic()) {
                state.set_paper_info(&paper_info)?;
            }

            if request.payment() > pool {
                return Err(ReviewError::InsufficientFunds(format!(
                    "Coin pool of conference {} is exhausted: {} left, {} owed to {}",
                    conference.id(),
                    pool,
                    request.payment(),
                    request.academic()
                )));
            }
            state.transfer(publisher, request.academic(), request.payment())?;
            pool -= request.payment();

            emit(
                context,
                "review_created",
                &[
                    ("review", review.id()),
                    ("paper", review.paper()),
                    ("reviewer", review.author()),
                    ("payment", request.payment().to_string().as_str()),
                ],
            )?;
        }
    }

    Ok(())
}

fn apply_submit_review(
    data: &SubmitReviewAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let mut review = load_review(&state, data.review())?;

    if review.review_status() != ReviewStatus::Pending {
        return Err(ReviewError::InvalidState(format!(
            "Review {} is already reviewed",
            review.id()
        )));
    }

    if data.status() == ReviewStatus::Pending {
        return Err(ReviewError::InvalidArgument(
            "The new status should be Fail or Pass".into(),
        ));
    }

    review.set_ipfs_hash(data.ipfs_hash().to_string());
    review.set_review_status(data.status());
    state.set_review(&review)?;

    emit(
        context,
        "review_submitted",
        &[
            ("review", review.id()),
            ("status", review.review_status().to_string().as_str()),
        ],
    )
}

fn apply_assess_paper(
    data: &AssessPaperAction,
    context: &dyn TransactionContext,
) -> Result<(), ReviewError> {
    let state = AcadReviewState::new(context);
    let mut submission = load_submission(&state, data.submission())?;

    if data.new_state() == SubmissionStatus::Pending {
        return Err(ReviewError::InvalidArgument(
            "The new status should be Fail or Pass".into(),
        ));
    }

    if submission.status() != SubmissionStatus::Pending {
        return Err(ReviewError::InvalidState(format!(
            "Submission {} is already assessed",
            submission.id()
        )));
    }

    let mut paper = load_paper(&state, submission.paper())?;

    submission.set_status(data.new_state());
    state.set_submission(&submission)?;

    if data.new_state() == SubmissionStatus::Pass {
        let conference = load_conference(&state, submission.conference())?;
        paper.set_owner(conference.publisher().to_string());
        paper.set_published(PublishState::Published);
    } else {
        paper.set_published(PublishState::NotPub);
    }
    state.set_paper(&paper)?;

    emit(
        context,
        "paper_assessed",
        &[
            ("submission", submission.id()),
            ("paper", paper.id()),
            ("status", submission.status().to_string().as_str()),
        ],
    )
}
