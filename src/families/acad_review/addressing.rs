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

//! State addresses for acad_review entities.
//!
//! An address is the 6 character family prefix, a 2 character entity tag and the first 62
//! characters of the SHA-512 of the entity id, 70 hex characters in total.

use sha2::{Digest, Sha512};

pub const FAMILY_NAME: &str = "acad_review";

const PAPER_TAG: &str = "00";
const PAPER_INFO_TAG: &str = "01";
const CONFERENCE_TAG: &str = "02";
const SUBMISSION_TAG: &str = "03";
const REVIEW_REQUEST_TAG: &str = "04";
const REVIEW_TAG: &str = "05";
const ACCOUNT_TAG: &str = "06";
const ACADEMIC_TAG: &str = "07";
const INDEX_TAG: &str = "10";

/// Secondary indexes kept alongside the entities. Each index maps a key (usually the id of
/// a referenced entity) to the ordered ids of the entities that reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    PaperInfoByPaper,
    SubmissionByPaper,
    SubmissionByConference,
    ReviewRequestByConference,
    ReviewByAuthor,
    ReviewByPaper,
}

impl Index {
    fn name(self) -> &'static str {
        match self {
            Index::PaperInfoByPaper => "paper_info_by_paper",
            Index::SubmissionByPaper => "submission_by_paper",
            Index::SubmissionByConference => "submission_by_conference",
            Index::ReviewRequestByConference => "review_request_by_conference",
            Index::ReviewByAuthor => "review_by_author",
            Index::ReviewByPaper => "review_by_paper",
        }
    }
}

fn hash(to_hash: &str) -> String {
    hex::encode(Sha512::digest(to_hash.as_bytes()))
}

pub fn get_acad_review_prefix() -> String {
    hash(FAMILY_NAME)[..6].to_string()
}

fn make_address(tag: &str, id: &str) -> String {
    get_acad_review_prefix() + tag + &hash(id)[..62]
}

pub fn make_paper_address(id: &str) -> String {
    make_address(PAPER_TAG, id)
}

pub fn make_paper_info_address(id: &str) -> String {
    make_address(PAPER_INFO_TAG, id)
}

pub fn make_conference_address(id: &str) -> String {
    make_address(CONFERENCE_TAG, id)
}

pub fn make_submission_address(id: &str) -> String {
    make_address(SUBMISSION_TAG, id)
}

pub fn make_review_request_address(id: &str) -> String {
    make_address(REVIEW_REQUEST_TAG, id)
}

pub fn make_review_address(id: &str) -> String {
    make_address(REVIEW_TAG, id)
}

pub fn make_account_address(owner: &str) -> String {
    make_address(ACCOUNT_TAG, owner)
}

pub fn make_academic_address(id: &str) -> String {
    make_address(ACADEMIC_TAG, id)
}

pub fn make_index_address(index: Index, key: &str) -> String {
    make_address(INDEX_TAG, &format!("{}/{}", index.name(), key))
}
