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

fn subscribe(executor: &Executor<HashMapState>, paper: &str, user: &str) -> TransactionReceipt {
    execute(
        executor,
        AcadReviewPayload::SubscribePaper(SubscribePaperAction::new(paper.into(), user.into())),
    )
}

fn paper_users(executor: &Executor<HashMapState>, paper: &str) -> Vec<String> {
    let snapshot = executor.snapshot().expect("Unable to snapshot state");
    AcadReviewState::new(&snapshot)
        .find_paper_info_by_paper(paper)
        .expect("Unable to query paper info")
        .expect("Paper info does not exist")
        .users()
        .to_vec()
}

/// 1. Publish p1 (acadCoinNum 3); its owner becomes the conference publisher
/// 2. uma, holding 5 coins, subscribes
/// 3. uma is left with 2 coins, the owner gains 3 and the paper gains one user
#[test]
fn subscribe_pays_paper_owner() {
    let executor = new_executor(&genesis(1, 2));
    publish(&executor, "p1");

    let owner_before = balance(&executor, "publisher");
    let users_before = paper_users(&executor, "p1").len();

    let receipt = subscribe(&executor, "p1", "uma");
    assert_valid(&receipt);

    assert_eq!(balance(&executor, "uma"), 2);
    assert_eq!(balance(&executor, "publisher"), owner_before + 3);
    let users = paper_users(&executor, "p1");
    assert_eq!(users.len(), users_before + 1);
    assert!(users.contains(&"uma".to_string()));

    let event = &receipt.events()[0];
    assert_eq!(event.event_type, "acad_review/paper_subscribed");
    assert_eq!(event.attribute("user"), Some("uma"));
    assert_eq!(event.attribute("payment"), Some("3"));
}

#[test]
fn subscribe_without_enough_coins() {
    let executor = new_executor(&genesis(1, 2));
    publish(&executor, "p1");

    // frank holds no coins
    assert_rejected(&subscribe(&executor, "p1", "frank"), "InsufficientFunds");
    assert_eq!(balance(&executor, "frank"), 0);
    assert!(!paper_users(&executor, "p1").contains(&"frank".to_string()));

    // the original owner keeps access after the paper changed hands
    assert_rejected(&subscribe(&executor, "p1", "alice"), "AlreadyExists");
}

/// 1. frank holds exactly the 3 coins p1 asks for
/// 2. The subscription goes through and leaves frank with nothing
#[test]
fn subscribe_with_exact_balance() {
    let executor = new_executor(&genesis(1, 2).with_balance("frank", 3));
    publish(&executor, "p1");
    let owner_before = balance(&executor, "publisher");

    assert_valid(&subscribe(&executor, "p1", "frank"));

    assert_eq!(balance(&executor, "frank"), 0);
    assert_eq!(balance(&executor, "publisher"), owner_before + 3);
    assert!(paper_users(&executor, "p1").contains(&"frank".to_string()));
}

#[test]
fn subscribe_preconditions_in_order() {
    let executor = new_executor(&genesis(1, 2));

    assert_rejected(&subscribe(&executor, "p1", "uma"), "NotFound");

    assert_valid(&create_paper_info(&executor, "p1"));
    assert_rejected(&subscribe(&executor, "p1", "uma"), "PreconditionFailed");

    assert_valid(&submit_paper(&executor, "p1"));
    let submission = submissions_of(&executor, "p1")
        .pop()
        .expect("Paper was not submitted");
    assert_valid(&assess(&executor, submission.id(), SubmissionStatus::Pass));

    assert_valid(&subscribe(&executor, "p1", "uma"));
    assert_rejected(&subscribe(&executor, "p1", "uma"), "AlreadyExists");
    assert_eq!(balance(&executor, "uma"), 2);
}

#[test]
fn create_paper_info_at_most_once() {
    let executor = new_executor(&genesis(1, 2));

    let receipt = create_paper_info(&executor, "p2");
    assert_valid(&receipt);
    assert_eq!(paper_users(&executor, "p2"), vec!["bob".to_string()]);

    assert_rejected(&create_paper_info(&executor, "p2"), "DuplicateEntity");
}

#[test]
fn failed_paper_can_be_resubmitted() {
    let executor = new_executor(&genesis(1, 2));
    assert_valid(&create_paper_info(&executor, "p2"));
    assert_valid(&submit_paper(&executor, "p2"));
    assert_rejected(&submit_paper(&executor, "p2"), "AlreadySubmitted");

    let submission = submissions_of(&executor, "p2")
        .pop()
        .expect("Paper was not submitted");
    assert_valid(&assess(&executor, submission.id(), SubmissionStatus::Fail));
    assert_rejected(
        &assess(&executor, submission.id(), SubmissionStatus::Pass),
        "InvalidState",
    );

    let snapshot = executor.snapshot().expect("Unable to snapshot state");
    let paper = AcadReviewState::new(&snapshot)
        .get_paper("p2")
        .expect("Unable to read paper")
        .expect("Paper does not exist");
    assert_eq!(paper.published(), PublishState::NotPub);
    assert_eq!(paper.owner(), "bob");

    assert_valid(&submit_paper(&executor, "p2"));
    assert_eq!(submissions_of(&executor, "p2").len(), 2);
}

#[test]
fn published_paper_cannot_be_resubmitted() {
    let executor = new_executor(&genesis(1, 2));
    publish(&executor, "p1");
    let head = executor.state_id().expect("Unable to read head");

    assert_rejected(&submit_paper(&executor, "p1"), "InvalidState");

    assert_eq!(executor.state_id().expect("Unable to read head"), head);
    assert_eq!(submissions_of(&executor, "p1").len(), 1);
}
