//! Draft text, exchange history and in-flight submissions.

use std::collections::HashSet;

use tracing::{debug, info};
use uuid::Uuid;

use crate::completion::CompletionResult;

/// Prefix put in front of failure messages recorded as answers.
pub const ERROR_PREFIX: &str = "Error: ";

/// One completed question/answer pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Set when the answer is a recorded failure rather than model output.
    pub failed: bool,
}

impl Exchange {
    pub fn is_error(&self) -> bool {
        self.failed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// A request that has been started but not yet recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    /// Draft text at the moment of submission.
    pub question: String,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    draft: String,
    /// Newest first.
    history: Vec<Exchange>,
    in_flight: HashSet<SubmissionId>,
    next_id: u64,
}

impl ChatSession {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Number of submissions awaiting a result.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_awaiting(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Start a submission with the current draft, verbatim. Empty drafts are
    /// submitted too.
    pub fn submit(&mut self) -> Submission {
        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.in_flight.insert(id);
        info!(submission = id.0, chars = self.draft.chars().count(), "submitting prompt");
        Submission { id, question: self.draft.clone() }
    }

    /// Record the outcome of `submission` at the front of the history.
    ///
    /// The draft is cleared only on success; a failure leaves it as it is so
    /// the user can resend.
    pub fn finish(&mut self, submission: Submission, result: CompletionResult) {
        self.in_flight.remove(&submission.id);
        let (answer, failed) = match result {
            CompletionResult::Success(answer) => {
                self.draft.clear();
                (answer, false)
            }
            CompletionResult::Failure(message) => {
                debug!(submission = submission.id.0, error = %message, "recording failure");
                (format!("{ERROR_PREFIX}{message}"), true)
            }
        };
        let exchange = Exchange {
            id: Uuid::new_v4(),
            question: submission.question,
            answer,
            failed,
        };
        info!(submission = submission.id.0, exchange = %exchange.id, failed, "exchange recorded");
        self.history.insert(0, exchange);
    }
}
