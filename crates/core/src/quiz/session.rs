use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Question, QuestionId, QuizCategoryFilter};
use crate::quiz::answer;

/// Number of answered questions that make up one round.
pub const ROUND_LENGTH: usize = 5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: QuizPhase,
    },

    #[error("discarded a response for a superseded question fetch")]
    StaleResponse,

    #[error("question source served question {0} twice")]
    RepeatedQuestion(QuestionId),
}

//
// ─── PHASES & SOURCE OUTCOMES ──────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizPhase {
    /// No category chosen yet.
    Idle,
    /// A question fetch is in flight; every user operation is rejected.
    Loading,
    Questioning,
    AnswerRevealed,
    Finished,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Questioning => "questioning",
            Self::AnswerRevealed => "showing the answer",
            Self::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// What the question source handed back for a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    Question(Question),
    /// No unseen question remains for the filter.
    Exhausted,
}

/// Identifies one outstanding fetch. Only the latest ticket of the current
/// generation is accepted by [`QuizSession::complete_advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Everything the question source needs to pick the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub filter: QuizCategoryFilter,
    /// Ids to exclude, including the question being moved past.
    pub seen_ids: Vec<QuestionId>,
}

/// Result of asking the session to move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The caller must fetch and then report back with the ticket.
    Fetch(FetchRequest),
    /// The round limit was reached; no fetch is needed.
    Finished,
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Outcome of one submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub question_id: QuestionId,
    pub guess: String,
    pub correct: bool,
}

/// Final score of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    /// Answered questions; below `ROUND_LENGTH` only when the source ran dry.
    pub answered: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Aggregated view of round progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub answered: usize,
    pub correct: usize,
    pub round_length: usize,
    pub is_finished: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
struct PendingFetch {
    ticket: FetchTicket,
    /// Phase restored when the fetch fails. `Idle` means the start is undone.
    resume: QuizPhase,
}

/// In-memory quiz round.
///
/// Every transition is synchronous. Moving to a new question is split in two:
/// [`start`](Self::start) or [`next_question`](Self::next_question) hand out a
/// [`FetchRequest`], and the caller reports the source's answer through
/// [`complete_advance`](Self::complete_advance) or
/// [`fail_advance`](Self::fail_advance). Nothing about the served question is
/// committed until the fetch succeeds.
#[derive(Debug, Clone)]
pub struct QuizSession {
    filter: Option<QuizCategoryFilter>,
    seen_ids: Vec<QuestionId>,
    current_question: Option<Question>,
    current_guess: String,
    round_index: usize,
    correct_count: usize,
    phase: QuizPhase,
    results: Vec<GuessResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    pending: Option<PendingFetch>,
    generation: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// An uninitialized session waiting for a category.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: None,
            seen_ids: Vec::new(),
            current_question: None,
            current_guess: String::new(),
            round_index: 0,
            correct_count: 0,
            phase: QuizPhase::Idle,
            results: Vec::new(),
            started_at: None,
            finished_at: None,
            pending: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn filter(&self) -> Option<QuizCategoryFilter> {
        self.filter
    }

    #[must_use]
    pub fn seen_ids(&self) -> &[QuestionId] {
        &self.seen_ids
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    /// Questions answered and moved past so far.
    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn results(&self) -> &[GuessResult] {
        &self.results
    }

    /// Outcome of the guess for the question on screen, once revealed.
    #[must_use]
    pub fn last_result(&self) -> Option<&GuessResult> {
        if self.phase == QuizPhase::AnswerRevealed {
            self.results.last()
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            answered: self.results.len(),
            correct: self.correct_count,
            round_length: ROUND_LENGTH,
            is_finished: self.is_finished(),
        }
    }

    /// Final score, available once the session is finished.
    #[must_use]
    pub fn score(&self) -> Option<QuizScore> {
        if !self.is_finished() {
            return None;
        }
        Some(QuizScore {
            correct: self.correct_count,
            answered: self.round_index,
            started_at: self.started_at?,
            finished_at: self.finished_at?,
        })
    }

    /// Begin a fresh round for `filter`, discarding whatever came before.
    ///
    /// Any fetch still in flight from an earlier round becomes stale.
    pub fn start(&mut self, filter: QuizCategoryFilter, at: DateTime<Utc>) -> FetchRequest {
        self.reset();
        self.filter = Some(filter);
        self.started_at = Some(at);
        self.begin_fetch(QuizPhase::Idle, filter, Vec::new())
    }

    /// Record a guess for the question on screen and reveal the answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless a question is awaiting an answer.
    /// The session is left untouched in that case.
    pub fn submit_guess(&mut self, guess: impl Into<String>) -> Result<&GuessResult, QuizError> {
        self.expect_phase(QuizPhase::Questioning, "submit a guess")?;
        let Some(question) = self.current_question.as_ref() else {
            return Err(self.invalid("submit a guess"));
        };

        let guess = guess.into();
        let correct = answer::is_correct(&guess, question.answer());
        let question_id = question.id();

        if correct {
            self.correct_count += 1;
        }
        self.current_guess.clone_from(&guess);
        self.results.push(GuessResult {
            question_id,
            guess,
            correct,
        });
        self.phase = QuizPhase::AnswerRevealed;

        self.results
            .last()
            .ok_or_else(|| self.invalid("submit a guess"))
    }

    /// Move past the revealed question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the answer is currently revealed.
    pub fn next_question(&mut self, at: DateTime<Utc>) -> Result<Advance, QuizError> {
        self.expect_phase(QuizPhase::AnswerRevealed, "move to the next question")?;
        let filter = self.filter.ok_or_else(|| self.invalid("move to the next question"))?;

        let (seen_ids, round_index) = self.consumed();
        if round_index >= ROUND_LENGTH {
            self.seen_ids = seen_ids;
            self.round_index = round_index;
            self.finish(at);
            return Ok(Advance::Finished);
        }

        Ok(Advance::Fetch(self.begin_fetch(
            QuizPhase::AnswerRevealed,
            filter,
            seen_ids,
        )))
    }

    /// Apply the source's answer for an outstanding fetch.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleResponse` if `ticket` is not the outstanding fetch
    /// (the session was restarted meanwhile); the outcome is ignored.
    /// Returns `QuizError::RepeatedQuestion` if the source served a seen id; the
    /// fetch is rolled back as if it had failed.
    pub fn complete_advance(
        &mut self,
        ticket: FetchTicket,
        outcome: NextQuestion,
        at: DateTime<Utc>,
    ) -> Result<QuizPhase, QuizError> {
        let pending = self.take_pending(ticket)?;
        let (seen_ids, round_index) = self.consumed();

        if let NextQuestion::Question(question) = &outcome {
            if seen_ids.contains(&question.id()) {
                self.roll_back(pending);
                return Err(QuizError::RepeatedQuestion(question.id()));
            }
        }

        self.seen_ids = seen_ids;
        self.round_index = round_index;
        self.current_guess.clear();

        match outcome {
            NextQuestion::Question(question) => {
                self.current_question = Some(question);
                self.phase = QuizPhase::Questioning;
            }
            NextQuestion::Exhausted => self.finish(at),
        }

        Ok(self.phase)
    }

    /// Undo the phase change of a failed fetch.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleResponse` if `ticket` is not the outstanding fetch.
    pub fn fail_advance(&mut self, ticket: FetchTicket) -> Result<QuizPhase, QuizError> {
        let pending = self.take_pending(ticket)?;
        self.roll_back(pending);
        Ok(self.phase)
    }

    /// Return to the uninitialized state. In-flight fetches become stale.
    pub fn restart(&mut self) {
        self.reset();
    }

    fn begin_fetch(
        &mut self,
        resume: QuizPhase,
        filter: QuizCategoryFilter,
        seen_ids: Vec<QuestionId>,
    ) -> FetchRequest {
        let ticket = FetchTicket {
            generation: self.generation,
        };
        self.pending = Some(PendingFetch { ticket, resume });
        self.phase = QuizPhase::Loading;
        FetchRequest {
            ticket,
            filter,
            seen_ids,
        }
    }

    fn take_pending(&mut self, ticket: FetchTicket) -> Result<PendingFetch, QuizError> {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                Ok(pending)
            }
            _ => {
                tracing::debug!(?ticket, generation = self.generation, "stale fetch outcome");
                Err(QuizError::StaleResponse)
            }
        }
    }

    fn roll_back(&mut self, pending: PendingFetch) {
        if pending.resume == QuizPhase::Idle {
            self.reset();
        } else {
            self.phase = pending.resume;
        }
    }

    /// Seen ids and round index as they will be once the current question is consumed.
    fn consumed(&self) -> (Vec<QuestionId>, usize) {
        let mut seen_ids = self.seen_ids.clone();
        let mut round_index = self.round_index;
        if let Some(question) = &self.current_question {
            seen_ids.push(question.id());
            round_index += 1;
        }
        (seen_ids, round_index)
    }

    fn finish(&mut self, at: DateTime<Utc>) {
        self.current_question = None;
        self.current_guess.clear();
        self.phase = QuizPhase::Finished;
        self.finished_at = Some(at);
    }

    fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::new()
        };
    }

    fn expect_phase(&self, expected: QuizPhase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            operation,
            phase: self.phase,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, Difficulty};
    use crate::time::fixed_now;

    fn question(id: u64, answer: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Question {id}?"),
            answer,
            CategoryId::new(1),
            Difficulty::new(2).unwrap(),
        )
    }

    fn started() -> (QuizSession, FetchRequest) {
        let mut session = QuizSession::new();
        let request = session.start(QuizCategoryFilter::All, fixed_now());
        (session, request)
    }

    fn serve(session: &mut QuizSession, request: FetchRequest, q: Question) {
        session
            .complete_advance(request.ticket, NextQuestion::Question(q), fixed_now())
            .unwrap();
    }

    fn fetch(advance: Advance) -> FetchRequest {
        match advance {
            Advance::Fetch(request) => request,
            Advance::Finished => panic!("expected a fetch"),
        }
    }

    #[test]
    fn new_session_is_idle() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(session.current_question().is_none());
        assert!(session.filter().is_none());
        assert!(session.score().is_none());
    }

    #[test]
    fn start_requests_first_question_with_no_exclusions() {
        let (session, request) = started();
        assert_eq!(session.phase(), QuizPhase::Loading);
        assert!(session.is_loading());
        assert!(request.seen_ids.is_empty());
        assert_eq!(request.filter, QuizCategoryFilter::All);
    }

    #[test]
    fn correct_guess_reveals_and_counts() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "William Shakespeare"));
        assert_eq!(session.phase(), QuizPhase::Questioning);
        assert_eq!(session.current_guess(), "");

        let result = session.submit_guess("shakespeare").unwrap();
        assert!(result.correct);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.phase(), QuizPhase::AnswerRevealed);
        assert_eq!(session.current_guess(), "shakespeare");
        assert_eq!(session.round_index(), 0);
    }

    #[test]
    fn next_question_excludes_everything_seen() {
        let (mut session, request) = started();
        serve(&mut session, request, question(7, "a"));
        session.submit_guess("a").unwrap();

        let request = fetch(session.next_question(fixed_now()).unwrap());
        assert_eq!(request.seen_ids, vec![QuestionId::new(7)]);
        // nothing is committed until the source answers
        assert!(session.seen_ids().is_empty());
        assert_eq!(session.round_index(), 0);

        serve(&mut session, request, question(9, "b"));
        assert_eq!(session.seen_ids(), &[QuestionId::new(7)]);
        assert_eq!(session.round_index(), 1);
        assert_eq!(session.current_question().unwrap().id(), QuestionId::new(9));
    }

    #[test]
    fn round_finishes_after_round_length_answers() {
        let (mut session, mut request) = started();
        for id in 1..=ROUND_LENGTH as u64 {
            serve(&mut session, request.clone(), question(id, "yes"));
            session
                .submit_guess(if id % 2 == 0 { "yes" } else { "no" })
                .unwrap();
            match session.next_question(fixed_now()).unwrap() {
                Advance::Fetch(next) => request = next,
                Advance::Finished => assert_eq!(id, ROUND_LENGTH as u64),
            }
        }

        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.round_index(), ROUND_LENGTH);
        assert_eq!(session.seen_ids().len(), ROUND_LENGTH);
        assert!(session.current_question().is_none());
        let score = session.score().unwrap();
        assert_eq!(score.correct, 2);
        assert_eq!(score.answered, ROUND_LENGTH);
    }

    #[test]
    fn exhaustion_finishes_with_partial_score() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "one"));
        session.submit_guess("one").unwrap();
        let request = fetch(session.next_question(fixed_now()).unwrap());
        serve(&mut session, request, question(2, "two"));
        session.submit_guess("wrong").unwrap();
        let request = fetch(session.next_question(fixed_now()).unwrap());

        let phase = session
            .complete_advance(request.ticket, NextQuestion::Exhausted, fixed_now())
            .unwrap();

        assert_eq!(phase, QuizPhase::Finished);
        assert!(session.current_question().is_none());
        let score = session.score().unwrap();
        assert_eq!((score.correct, score.answered), (1, 2));
    }

    #[test]
    fn exhausted_before_first_question_scores_zero_of_zero() {
        let (mut session, request) = started();
        session
            .complete_advance(request.ticket, NextQuestion::Exhausted, fixed_now())
            .unwrap();
        let score = session.score().unwrap();
        assert_eq!((score.correct, score.answered), (0, 0));
    }

    #[test]
    fn guess_outside_questioning_is_rejected_without_side_effects() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "x"));
        session.submit_guess("x").unwrap();

        let err = session.submit_guess("x").unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                phase: QuizPhase::AnswerRevealed,
                ..
            }
        ));
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn guess_after_finish_is_rejected() {
        let (mut session, request) = started();
        session
            .complete_advance(request.ticket, NextQuestion::Exhausted, fixed_now())
            .unwrap();
        let err = session.submit_guess("late").unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                phase: QuizPhase::Finished,
                ..
            }
        ));
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn operations_are_rejected_while_loading() {
        let (mut session, _request) = started();
        assert!(session.submit_guess("x").is_err());
        assert!(session.next_question(fixed_now()).is_err());
        assert_eq!(session.phase(), QuizPhase::Loading);
    }

    #[test]
    fn next_question_requires_revealed_answer() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "x"));
        let err = session.next_question(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                phase: QuizPhase::Questioning,
                ..
            }
        ));
    }

    #[test]
    fn failed_fetch_restores_revealed_state() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "x"));
        session.submit_guess("x").unwrap();
        let request = fetch(session.next_question(fixed_now()).unwrap());

        let phase = session.fail_advance(request.ticket).unwrap();

        assert_eq!(phase, QuizPhase::AnswerRevealed);
        assert!(session.seen_ids().is_empty());
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.current_question().unwrap().id(), QuestionId::new(1));

        // retry succeeds with the same exclusions
        let retry = fetch(session.next_question(fixed_now()).unwrap());
        assert_eq!(retry.seen_ids, vec![QuestionId::new(1)]);
    }

    #[test]
    fn failed_first_fetch_returns_to_idle() {
        let (mut session, request) = started();
        session.fail_advance(request.ticket).unwrap();
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(session.filter().is_none());
    }

    #[test]
    fn repeated_question_is_rolled_back() {
        let (mut session, request) = started();
        serve(&mut session, request, question(3, "x"));
        session.submit_guess("x").unwrap();
        let request = fetch(session.next_question(fixed_now()).unwrap());

        let err = session
            .complete_advance(
                request.ticket,
                NextQuestion::Question(question(3, "x")),
                fixed_now(),
            )
            .unwrap_err();

        assert_eq!(err, QuizError::RepeatedQuestion(QuestionId::new(3)));
        assert_eq!(session.phase(), QuizPhase::AnswerRevealed);
        assert!(session.seen_ids().is_empty());
    }

    #[test]
    fn response_after_restart_is_stale() {
        let (mut session, request) = started();
        session.restart();

        let err = session
            .complete_advance(
                request.ticket,
                NextQuestion::Question(question(1, "x")),
                fixed_now(),
            )
            .unwrap_err();

        assert_eq!(err, QuizError::StaleResponse);
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn response_from_previous_round_is_stale_after_new_start() {
        let (mut session, old) = started();
        let new = session.start(
            QuizCategoryFilter::Category(CategoryId::new(2)),
            fixed_now(),
        );

        assert_eq!(
            session.fail_advance(old.ticket).unwrap_err(),
            QuizError::StaleResponse
        );
        assert!(session.is_loading());
        serve(&mut session, new, question(4, "x"));
        assert_eq!(session.phase(), QuizPhase::Questioning);
    }

    #[test]
    fn restart_clears_every_field() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "x"));
        session.submit_guess("x").unwrap();

        session.restart();

        assert_eq!(session.phase(), QuizPhase::Idle);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.round_index(), 0);
        assert!(session.results().is_empty());
        assert!(session.current_question().is_none());
        assert_eq!(session.current_guess(), "");
    }

    #[test]
    fn unanswered_question_does_not_count_toward_round() {
        let (mut session, request) = started();
        serve(&mut session, request, question(1, "x"));
        assert_eq!(session.round_index(), 0);
        assert!(session.seen_ids().is_empty());
        assert_eq!(session.progress().answered, 0);
    }
}
