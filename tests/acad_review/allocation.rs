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

use super::*;

/// Prepares "conf" for allocation:
///
/// 1. Create the paper info for each of `papers` and submit them, in order
/// 2. Have each of `reviewers` request to review, in order
fn open_conference(executor: &Executor<HashMapState>, papers: &[&str], reviewers: &[&str]) {
    for paper in papers {
        assert_valid(&create_paper_info(executor, paper));
        assert_valid(&submit_paper(executor, paper));
    }
    for reviewer in reviewers {
        assert_valid(&request_review(executor, reviewer));
    }
}

/// (reviewer, paper, payment) of every review_created event on the receipt
fn allocations(receipt: &TransactionReceipt) -> Vec<(String, String, String)> {
    receipt
        .events()
        .iter()
        .filter(|event| event.event_type == "acad_review/review_created")
        .map(|event| {
            (
                event.attribute("reviewer").unwrap_or_default().to_string(),
                event.attribute("paper").unwrap_or_default().to_string(),
                event.attribute("payment").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn allocate_one_review_per_paper() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1", "p2"], &["carol", "dave"]);

    let receipt = allocate(&executor, 1, 0);
    assert_valid(&receipt);

    assert_eq!(
        allocations(&receipt),
        vec![
            ("carol".into(), "p1".into(), "2".into()),
            ("dave".into(), "p2".into(), "2".into()),
        ]
    );
    assert_eq!(balance(&executor, "carol"), 2);
    assert_eq!(balance(&executor, "dave"), 2);
    assert_eq!(balance(&executor, "publisher"), 16);

    let reviews = reviews_of(&executor, "p1");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].owner(), "publisher");
    assert_eq!(reviews[0].author(), "carol");
    assert_eq!(reviews[0].conference(), "conf");
    assert_eq!(reviews[0].review_status(), ReviewStatus::Pending);
    assert!(!reviews[0].is_rated());
}

/// 1. carol requests while the conference pays 2 per review
/// 2. The conference raises its payment to 5
/// 3. dave requests
/// 4. Each reviewer is paid what the conference offered when they asked
#[test]
fn reviewers_are_paid_what_they_were_offered() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1", "p2"], &["carol"]);

    executor
        .seed(|context| Genesis::new().with_conference(conference(2, 5)).apply(context))
        .expect("Unable to raise the payment");
    assert_valid(&request_review(&executor, "dave"));

    assert_valid(&allocate(&executor, 1, 0));

    assert_eq!(balance(&executor, "carol"), 2);
    assert_eq!(balance(&executor, "dave"), 5);
    assert_eq!(balance(&executor, "publisher"), 13);
}

#[test]
fn requests_are_dealt_round_robin() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1", "p2"], &["carol", "dave", "erin", "frank"]);

    let receipt = allocate(&executor, 2, 0);
    assert_valid(&receipt);

    let pairs = allocations(&receipt)
        .into_iter()
        .map(|(reviewer, paper, _)| (reviewer, paper))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![
            ("carol".into(), "p1".into()),
            ("dave".into(), "p2".into()),
            ("erin".into(), "p1".into()),
            ("frank".into(), "p2".into()),
        ]
    );
    assert_eq!(reviews_of(&executor, "p1").len(), 2);
    assert_eq!(reviews_of(&executor, "p2").len(), 2);
    assert_eq!(balance(&executor, "publisher"), 12);
}

#[test]
fn surplus_requests_are_left_unallocated() {
    let executor = new_executor(&genesis(1, 2));
    open_conference(&executor, &["p1", "p2"], &["carol", "dave", "erin"]);

    let receipt = allocate(&executor, 2, 0);
    assert_valid(&receipt);

    // paperNum is 1, so only the first pending submission is reviewed
    assert_eq!(
        allocations(&receipt),
        vec![
            ("carol".into(), "p1".into(), "2".into()),
            ("dave".into(), "p1".into(), "2".into()),
        ]
    );
    assert!(reviews_of(&executor, "p2").is_empty());
    assert_eq!(balance(&executor, "erin"), 0);
}

/// 1. Offer a pool of 3 coins while each of the two reviewers is owed 2
/// 2. The second payment cannot be made and the transaction is rejected
/// 3. Neither review exists, no coins moved and the head did not change
#[test]
fn exhausted_pool_rolls_back_allocation() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1", "p2"], &["carol", "dave"]);
    let head = executor.state_id().expect("Unable to read head");

    assert_rejected(&allocate(&executor, 1, 3), "InsufficientFunds");

    assert_eq!(executor.state_id().expect("Unable to read head"), head);
    assert!(reviews_of(&executor, "p1").is_empty());
    assert!(reviews_of(&executor, "p2").is_empty());
    assert_eq!(balance(&executor, "carol"), 0);
    assert_eq!(balance(&executor, "publisher"), 20);

    // a large enough pool succeeds against the same state
    assert_valid(&allocate(&executor, 1, 4));
    assert_eq!(balance(&executor, "publisher"), 16);
}

#[test]
fn allocation_preconditions() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1"], &["carol", "dave"]);

    assert_rejected(&allocate(&executor, 0, 0), "InvalidArgument");
    assert_rejected(&allocate(&executor, 1, 21), "InsufficientFunds");
    assert_rejected(&allocate(&executor, 1, 0), "InsufficientSubmissions");

    // bob co-authors p1
    assert_rejected(&request_review(&executor, "bob"), "ConflictOfInterest");

    // erin asked to review before submitting p3
    assert_valid(&request_review(&executor, "erin"));
    assert_valid(&create_paper_info(&executor, "p3"));
    assert_rejected(&submit_paper(&executor, "p3"), "ConflictOfInterest");

    assert_valid(&create_paper_info(&executor, "p2"));
    assert_valid(&submit_paper(&executor, "p2"));
    assert_valid(&allocate(&executor, 1, 0));
}

#[test]
fn too_few_reviewers() {
    let executor = new_executor(&genesis(2, 2));
    open_conference(&executor, &["p1", "p2"], &["carol"]);

    assert_rejected(&allocate(&executor, 1, 0), "InsufficientReviewers");
    assert_valid(&request_review(&executor, "dave"));
    assert_rejected(&allocate(&executor, 2, 0), "InsufficientReviewers");
    assert_valid(&allocate(&executor, 1, 0));
}

#[test]
fn submit_review_once() {
    let executor = new_executor(&genesis(1, 2));
    open_conference(&executor, &["p1"], &["carol"]);
    assert_valid(&allocate(&executor, 1, 0));

    let review = reviews_of(&executor, "p1")
        .pop()
        .expect("Review was not allocated");
    let submit = |status| {
        execute(
            &executor,
            AcadReviewPayload::SubmitReview(SubmitReviewAction::new(
                review.id().into(),
                status,
                "QmReview".into(),
            )),
        )
    };

    assert_rejected(&submit(ReviewStatus::Pending), "InvalidArgument");
    assert_valid(&submit(ReviewStatus::Pass));
    assert_rejected(&submit(ReviewStatus::Fail), "InvalidState");

    let reviewed = reviews_of(&executor, "p1")
        .pop()
        .expect("Review disappeared");
    assert_eq!(reviewed.review_status(), ReviewStatus::Pass);
    assert_eq!(reviewed.ipfs_hash(), "QmReview");
}
