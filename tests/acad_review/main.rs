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

#![cfg(feature = "family-acad-review")]

mod allocation;
mod subscription;

use acadreview::execution::{Executor, ExecutorError};
use acadreview::families::acad_review::{
    AcadReviewState, AcadReviewTransactionBuilder, AcadReviewTransactionHandler, Genesis,
};
use acadreview::protocol::acad_review::{
    AcadReviewPayload, Academic, AcademicBuilder, AllocatePapersAction, AssessPaperAction,
    Conference, ConferenceBuilder, CreatePaperInfoAction, Paper, PaperBuilder, PublishState,
    RequestReviewAction, Review, ReviewStatus, Submission, SubmissionStatus, SubmitPaperAction,
    SubmitReviewAction, SubscribePaperAction,
};
use acadreview::protocol::receipt::{TransactionReceipt, TransactionResult};
use acadreview::protocol::transaction::TransactionRequest;
use acadreview::state::hashmap::HashMapState;

/// Identities seeded by `genesis`. Every coin in the ledger belongs to one of them.
const IDENTITIES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "publisher", "uma",
];

fn academic(id: &str, interest: &[&str]) -> Academic {
    AcademicBuilder::new()
        .with_id(id.into())
        .with_name(id.to_uppercase())
        .with_interest(interest.iter().map(|s| s.to_string()).collect())
        .build()
        .expect("Unable to build academic")
}

fn paper(id: &str, owner: &str, authors: &[&str], acad_coin_num: u64) -> Paper {
    PaperBuilder::new()
        .with_id(id.into())
        .with_title(format!("On {}", id))
        .with_keywords(vec!["consensus".into(), "peer-review".into()])
        .with_owner(owner.into())
        .with_authors(authors.iter().map(|s| s.to_string()).collect())
        .with_acad_coin_num(acad_coin_num)
        .build()
        .expect("Unable to build paper")
}

fn conference(paper_num: u64, payment: u64) -> Conference {
    ConferenceBuilder::new()
        .with_id("conf".into())
        .with_title("Distributed Ledgers".into())
        .with_keywords(vec!["consensus".into()])
        .with_paper_num(paper_num)
        .with_reviewer_rating(3.0)
        .with_payment(payment)
        .with_publisher("publisher".into())
        .build()
        .expect("Unable to build conference")
}

/// alice owns p1 (co-authored by bob), bob owns p2 and erin owns p3. carol, dave and frank
/// are reviewers; uma only reads.
fn genesis(paper_num: u64, payment: u64) -> Genesis {
    Genesis::new()
        .with_academic(academic("alice", &["consensus"]))
        .with_academic(academic("bob", &["consensus"]))
        .with_academic(academic("carol", &["consensus"]))
        .with_academic(academic("dave", &["consensus", "storage"]))
        .with_academic(academic("erin", &["consensus"]))
        .with_academic(academic("frank", &["consensus"]))
        .with_academic(academic("publisher", &[]))
        .with_academic(academic("uma", &[]))
        .with_paper(paper("p1", "alice", &["bob"], 3))
        .with_paper(paper("p2", "bob", &[], 1))
        .with_paper(paper("p3", "erin", &[], 2))
        .with_conference(conference(paper_num, payment))
        .with_balance("alice", 1)
        .with_balance("publisher", 20)
        .with_balance("uma", 5)
}

fn new_executor(genesis: &Genesis) -> Executor<HashMapState> {
    let executor = Executor::new(
        HashMapState::new(),
        HashMapState::initial_state_id(),
        vec![Box::new(AcadReviewTransactionHandler::new())],
    );
    executor
        .seed(|context| genesis.apply(context))
        .expect("Unable to seed genesis");
    executor
}

fn request(payload: AcadReviewPayload) -> TransactionRequest {
    AcadReviewTransactionBuilder::new()
        .with_payload(payload)
        .with_signer("test".into())
        .build()
        .expect("Unable to build request")
}

fn execute(executor: &Executor<HashMapState>, payload: AcadReviewPayload) -> TransactionReceipt {
    executor
        .execute(&request(payload))
        .expect("Unable to execute transaction")
}

fn assert_valid(receipt: &TransactionReceipt) {
    if let TransactionResult::Invalid { error_message, .. } = &receipt.transaction_result {
        panic!("transaction was rejected: {}", error_message);
    }
}

fn assert_rejected(receipt: &TransactionReceipt, kind: &str) {
    match &receipt.transaction_result {
        TransactionResult::Invalid { error_message, .. } => assert!(
            error_message.starts_with(&format!("{}:", kind)),
            "expected {} but got {}",
            kind,
            error_message
        ),
        TransactionResult::Valid { .. } => panic!("expected {} but transaction was valid", kind),
    }
}

fn balance(executor: &Executor<HashMapState>, owner: &str) -> u64 {
    let snapshot = executor.snapshot().expect("Unable to snapshot state");
    AcadReviewState::new(&snapshot)
        .get_balance(owner)
        .expect("Unable to read balance")
}

fn total_supply(executor: &Executor<HashMapState>) -> u64 {
    IDENTITIES.iter().map(|owner| balance(executor, owner)).sum()
}

fn create_paper_info(executor: &Executor<HashMapState>, paper: &str) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::CreatePaperInfo(CreatePaperInfoAction::new(
            paper.into(),
            format!("Qm{}", paper),
            format!("key-{}", paper),
        )),
    )
}

fn submit_paper(executor: &Executor<HashMapState>, paper: &str) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::SubmitPaper(SubmitPaperAction::new(paper.into(), "conf".into())),
    )
}

fn request_review(executor: &Executor<HashMapState>, academic: &str) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::RequestReview(RequestReviewAction::new(
            academic.into(),
            "conf".into(),
        )),
    )
}

fn allocate(
    executor: &Executor<HashMapState>,
    review_per_paper: i64,
    max_coins: i64,
) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::AllocatePapers(AllocatePapersAction::new(
            "conf".into(),
            review_per_paper,
            max_coins,
        )),
    )
}

fn submissions_of(executor: &Executor<HashMapState>, paper: &str) -> Vec<Submission> {
    let snapshot = executor.snapshot().expect("Unable to snapshot state");
    AcadReviewState::new(&snapshot)
        .find_submissions_by_paper(paper)
        .expect("Unable to query submissions")
}

fn reviews_of(executor: &Executor<HashMapState>, paper: &str) -> Vec<Review> {
    let snapshot = executor.snapshot().expect("Unable to snapshot state");
    AcadReviewState::new(&snapshot)
        .find_reviews_by_paper(paper)
        .expect("Unable to query reviews")
}

fn assess(
    executor: &Executor<HashMapState>,
    submission: &str,
    new_state: SubmissionStatus,
) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::AssessPaper(AssessPaperAction::new(submission.into(), new_state)),
    )
}

/// Creates the paper info, submits the paper to "conf" and has the conference accept it.
fn publish(executor: &Executor<HashMapState>, paper: &str) {
    assert_valid(&create_paper_info(executor, paper));
    assert_valid(&submit_paper(executor, paper));
    let submission = submissions_of(executor, paper)
        .pop()
        .expect("Paper was not submitted");
    assert_valid(&assess(executor, submission.id(), SubmissionStatus::Pass));
}
