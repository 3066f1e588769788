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

//! Native types for the acad_review transaction family.
//!
//! Entities are stored in state as JSON through the `codec` traits. Cross-entity
//! references are plain entity ids; identities (owners, authors, reviewers, publishers) are
//! the ids of `Academic` entities.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishState {
    NotPub,
    Submitted,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConferenceStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Pass,
    Fail,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubmissionStatus::Pending => f.write_str("Pending"),
            SubmissionStatus::Pass => f.write_str("Pass"),
            SubmissionStatus::Fail => f.write_str("Fail"),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReviewStatus::Pending => f.write_str("Pending"),
            ReviewStatus::Pass => f.write_str("Pass"),
            ReviewStatus::Fail => f.write_str("Fail"),
        }
    }
}

#[derive(Debug)]
pub enum AcadReviewBuildError {
    MissingField(String),
    InvalidField(String),
}

impl StdError for AcadReviewBuildError {}

impl fmt::Display for AcadReviewBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AcadReviewBuildError::MissingField(ref s) => write!(f, "MissingField: {}", s),
            AcadReviewBuildError::InvalidField(ref s) => write!(f, "InvalidField: {}", s),
        }
    }
}

/// A researcher. Academics author papers, publish conferences and review submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Academic {
    id: String,
    name: String,
    interest: Vec<String>,
}

impl Academic {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interest(&self) -> &[String] {
        &self.interest
    }
}

#[derive(Default, Clone)]
pub struct AcademicBuilder {
    id: Option<String>,
    name: Option<String>,
    interest: Vec<String>,
}

impl AcademicBuilder {
    pub fn new() -> Self {
        AcademicBuilder::default()
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_interest(mut self, interest: Vec<String>) -> Self {
        self.interest = interest;
        self
    }

    pub fn build(self) -> Result<Academic, AcadReviewBuildError> {
        let id = self.id.ok_or_else(|| {
            AcadReviewBuildError::MissingField("'id' field is required".to_string())
        })?;
        let name = self.name.unwrap_or_default();

        Ok(Academic {
            id,
            name,
            interest: self.interest,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    id: String,
    title: String,
    keywords: Vec<String>,
    owner: String,
    authors: Vec<String>,
    published: PublishState,
    acad_coin_num: u64,
}

impl Paper {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn published(&self) -> PublishState {
        self.published
    }

    /// Coins a reader pays the owner to subscribe once the paper is published.
    pub fn acad_coin_num(&self) -> u64 {
        self.acad_coin_num
    }

    pub fn set_owner(&mut self, owner: String) {
        self.owner = owner;
    }

    pub fn set_published(&mut self, published: PublishState) {
        self.published = published;
    }

    /// Whether the academic is the owner or one of the authors.
    pub fn is_owned_or_authored_by(&self, academic: &str) -> bool {
        self.owner == academic || self.authors.iter().any(|author| author == academic)
    }
}

#[derive(Default, Clone)]
pub struct PaperBuilder {
    id: Option<String>,
    title: String,
    keywords: Vec<String>,
    owner: Option<String>,
    authors: Vec<String>,
    published: Option<PublishState>,
    acad_coin_num: u64,
}

impl PaperBuilder {
    pub fn new() -> Self {
        PaperBuilder::default()
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_published(mut self, published: PublishState) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_acad_coin_num(mut self, acad_coin_num: u64) -> Self {
        self.acad_coin_num = acad_coin_num;
        self
    }

    pub fn build(self) -> Result<Paper, AcadReviewBuildError> {
        let id = self.id.ok_or_else(|| {
            AcadReviewBuildError::MissingField("'id' field is required".to_string())
        })?;
        let owner = self.owner.ok_or_else(|| {
            AcadReviewBuildError::MissingField("'owner' field is required".to_string())
        })?;

        Ok(Paper {
            id,
            title: self.title,
            keywords: self.keywords,
            owner,
            authors: self.authors,
            published: self.published.unwrap_or(PublishState::NotPub),
            acad_coin_num: self.acad_coin_num,
        })
    }
}

/// Access record for a paper's encrypted content. `users` are the identities allowed to
/// decrypt it and never contains duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperInfo {
    id: String,
    paper: String,
    #[serde(rename = "IPFSHash")]
    ipfs_hash: String,
    decrypt_key: String,
    users: Vec<String>,
}

impl PaperInfo {
    pub fn new(id: String, paper: String, ipfs_hash: String, decrypt_key: String) -> Self {
        PaperInfo {
            id,
            paper,
            ipfs_hash,
            decrypt_key,
            users: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn ipfs_hash(&self) -> &str {
        &self.ipfs_hash
    }

    pub fn decrypt_key(&self) -> &str {
        &self.decrypt_key
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn has_user(&self, user: &str) -> bool {
        self.users.iter().any(|existing| existing == user)
    }

    /// Adds the user if not already subscribed. Returns whether the user was added.
    pub fn add_user(&mut self, user: &str) -> bool {
        if self.has_user(user) {
            return false;
        }
        self.users.push(user.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    id: String,
    title: String,
    keywords: Vec<String>,
    con_status: ConferenceStatus,
    paper_num: u64,
    reviewer_rating: f64,
    payment: u64,
    publisher: String,
    acad_coin_num: u64,
}

impl Conference {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn con_status(&self) -> ConferenceStatus {
        self.con_status
    }

    /// Number of pending submissions required before papers can be allocated.
    pub fn paper_num(&self) -> u64 {
        self.paper_num
    }

    /// Minimum average rating a reviewer needs to request a review slot.
    pub fn reviewer_rating(&self) -> f64 {
        self.reviewer_rating
    }

    /// Coins paid to a reviewer per allocated review.
    pub fn payment(&self) -> u64 {
        self.payment
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn acad_coin_num(&self) -> u64 {
        self.acad_coin_num
    }

    pub fn set_con_status(&mut self, con_status: ConferenceStatus) {
        self.con_status = con_status;
    }
}

#[derive(Default, Clone)]
pub struct ConferenceBuilder {
    id: Option<String>,
    title: String,
    keywords: Vec<String>,
    con_status: Option<ConferenceStatus>,
    paper_num: u64,
    reviewer_rating: f64,
    payment: u64,
    publisher: Option<String>,
    acad_coin_num: u64,
}

impl ConferenceBuilder {
    pub fn new() -> Self {
        ConferenceBuilder::default()
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_con_status(mut self, con_status: ConferenceStatus) -> Self {
        self.con_status = Some(con_status);
        self
    }

    pub fn with_paper_num(mut self, paper_num: u64) -> Self {
        self.paper_num = paper_num;
        self
    }

    pub fn with_reviewer_rating(mut self, reviewer_rating: f64) -> Self {
        self.reviewer_rating = reviewer_rating;
        self
    }

    pub fn with_payment(mut self, payment: u64) -> Self {
        self.payment = payment;
        self
    }

    pub fn with_publisher(mut self, publisher: String) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_acad_coin_num(mut self, acad_coin_num: u64) -> Self {
        self.acad_coin_num = acad_coin_num;
        self
    }

    pub fn build(self) -> Result<Conference, AcadReviewBuildError> {
        let id = self.id.ok_or_else(|| {
            AcadReviewBuildError::MissingField("'id' field is required".to_string())
        })?;
        let publisher = self.publisher.ok_or_else(|| {
            AcadReviewBuildError::MissingField("'publisher' field is required".to_string())
        })?;
        if !self.reviewer_rating.is_finite() {
            return Err(AcadReviewBuildError::InvalidField(format!(
                "'reviewer_rating' must be finite, got {}",
                self.reviewer_rating
            )));
        }

        Ok(Conference {
            id,
            title: self.title,
            keywords: self.keywords,
            con_status: self.con_status.unwrap_or(ConferenceStatus::Open),
            paper_num: self.paper_num,
            reviewer_rating: self.reviewer_rating,
            payment: self.payment,
            publisher,
            acad_coin_num: self.acad_coin_num,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    id: String,
    paper: String,
    conference: String,
    status: SubmissionStatus,
}

impl Submission {
    pub fn new(id: String, paper: String, conference: String) -> Self {
        Submission {
            id,
            paper,
            conference,
            status: SubmissionStatus::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }
}

/// A standing offer by an academic to review for a conference. `payment` is the
/// conference's payment at the time of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    id: String,
    academic: String,
    conference: String,
    payment: u64,
}

impl ReviewRequest {
    pub fn new(id: String, academic: String, conference: String, payment: u64) -> Self {
        ReviewRequest {
            id,
            academic,
            conference,
            payment,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn academic(&self) -> &str {
        &self.academic
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }

    pub fn payment(&self) -> u64 {
        self.payment
    }
}

/// Sentinel rating of a review that has not been rated.
pub const UNRATED: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: String,
    owner: String,
    author: String,
    paper: String,
    conference: String,
    #[serde(rename = "IPFSHash")]
    ipfs_hash: String,
    review_status: ReviewStatus,
    rating: f64,
}

impl Review {
    /// A pending, unrated review of `paper` by `author`, owned by the conference publisher.
    pub fn new(id: String, owner: String, author: String, paper: String, conference: String) -> Self {
        Review {
            id,
            owner,
            author,
            paper,
            conference,
            ipfs_hash: String::new(),
            review_status: ReviewStatus::Pending,
            rating: UNRATED,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }

    pub fn ipfs_hash(&self) -> &str {
        &self.ipfs_hash
    }

    pub fn review_status(&self) -> ReviewStatus {
        self.review_status
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn is_rated(&self) -> bool {
        self.rating >= 0.0
    }

    pub fn set_ipfs_hash(&mut self, ipfs_hash: String) {
        self.ipfs_hash = ipfs_hash;
    }

    pub fn set_review_status(&mut self, review_status: ReviewStatus) {
        self.review_status = review_status;
    }

    /// Records the rating given to this review. Ratings are assigned outside the six
    /// workflow actions, typically at genesis or by a separate rating process.
    ///
    /// Ratings are stored as JSON numbers, so NaN and the infinities are refused.
    pub fn set_rating(&mut self, rating: f64) -> Result<(), AcadReviewBuildError> {
        if !rating.is_finite() {
            return Err(AcadReviewBuildError::InvalidField(format!(
                "'rating' must be finite, got {}",
                rating
            )));
        }
        self.rating = rating;
        Ok(())
    }
}

/// AcadCoin holdings of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    owner: String,
    balance: u64,
}

impl Account {
    pub fn new(owner: String, balance: u64) -> Self {
        Account { owner, balance }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: u64) {
        self.balance = balance;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum AcadReviewPayload {
    CreatePaperInfo(CreatePaperInfoAction),
    SubscribePaper(SubscribePaperAction),
    SubmitPaper(SubmitPaperAction),
    RequestReview(RequestReviewAction),
    AllocatePapers(AllocatePapersAction),
    SubmitReview(SubmitReviewAction),
    AssessPaper(AssessPaperAction),
}

impl AcadReviewPayload {
    /// The action name, as used in log messages and errors.
    pub fn action(&self) -> &'static str {
        match self {
            AcadReviewPayload::CreatePaperInfo(_) => "CreatePaperInfo",
            AcadReviewPayload::SubscribePaper(_) => "SubscribePaper",
            AcadReviewPayload::SubmitPaper(_) => "SubmitPaper",
            AcadReviewPayload::RequestReview(_) => "RequestReview",
            AcadReviewPayload::AllocatePapers(_) => "AllocatePapers",
            AcadReviewPayload::SubmitReview(_) => "SubmitReview",
            AcadReviewPayload::AssessPaper(_) => "AssessPaper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaperInfoAction {
    paper: String,
    #[serde(rename = "IPFSHash")]
    ipfs_hash: String,
    decrypt_key: String,
}

impl CreatePaperInfoAction {
    pub fn new(paper: String, ipfs_hash: String, decrypt_key: String) -> Self {
        CreatePaperInfoAction {
            paper,
            ipfs_hash,
            decrypt_key,
        }
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn ipfs_hash(&self) -> &str {
        &self.ipfs_hash
    }

    pub fn decrypt_key(&self) -> &str {
        &self.decrypt_key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribePaperAction {
    paper: String,
    new_user: String,
}

impl SubscribePaperAction {
    pub fn new(paper: String, new_user: String) -> Self {
        SubscribePaperAction { paper, new_user }
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn new_user(&self) -> &str {
        &self.new_user
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaperAction {
    paper: String,
    conference: String,
}

impl SubmitPaperAction {
    pub fn new(paper: String, conference: String) -> Self {
        SubmitPaperAction { paper, conference }
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestReviewAction {
    academic: String,
    conference: String,
}

impl RequestReviewAction {
    pub fn new(academic: String, conference: String) -> Self {
        RequestReviewAction {
            academic,
            conference,
        }
    }

    pub fn academic(&self) -> &str {
        &self.academic
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatePapersAction {
    conference: String,
    review_per_paper: i64,
    max_coins: i64,
}

impl AllocatePapersAction {
    pub fn new(conference: String, review_per_paper: i64, max_coins: i64) -> Self {
        AllocatePapersAction {
            conference,
            review_per_paper,
            max_coins,
        }
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }

    pub fn review_per_paper(&self) -> i64 {
        self.review_per_paper
    }

    /// Upper bound on coins paid out; zero or less means the publisher's whole balance.
    pub fn max_coins(&self) -> i64 {
        self.max_coins
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewAction {
    review: String,
    status: ReviewStatus,
    #[serde(rename = "IPFSHash")]
    ipfs_hash: String,
}

impl SubmitReviewAction {
    pub fn new(review: String, status: ReviewStatus, ipfs_hash: String) -> Self {
        SubmitReviewAction {
            review,
            status,
            ipfs_hash,
        }
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn ipfs_hash(&self) -> &str {
        &self.ipfs_hash
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessPaperAction {
    submission: String,
    new_state: SubmissionStatus,
}

impl AssessPaperAction {
    pub fn new(submission: String, new_state: SubmissionStatus) -> Self {
        AssessPaperAction {
            submission,
            new_state,
        }
    }

    pub fn submission(&self) -> &str {
        &self.submission
    }

    pub fn new_state(&self) -> SubmissionStatus {
        self.new_state
    }
}
