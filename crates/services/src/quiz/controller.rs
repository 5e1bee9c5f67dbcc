use std::fmt;
use std::sync::Arc;

use trivia_core::Clock;
use trivia_core::model::QuizCategoryFilter;
use trivia_core::quiz::{
    Advance, FetchRequest, FetchTicket, GuessResult, NextQuestion, QuizError, QuizPhase,
    QuizSession,
};

use super::observer::QuizObserver;
use crate::error::QuizServiceError;
use crate::sequencer::QuestionSequencer;

/// Drives a `QuizSession` against the question source.
///
/// Operations take `&mut self`, so at most one fetch is ever outstanding.
/// Observers are notified after every transition, including the switch to
/// `Loading` and any rollback.
pub struct QuizController {
    sequencer: QuestionSequencer,
    clock: Clock,
    session: QuizSession,
    observers: Vec<Arc<dyn QuizObserver>>,
}

impl QuizController {
    #[must_use]
    pub fn new(sequencer: QuestionSequencer, clock: Clock) -> Self {
        Self {
            sequencer,
            clock,
            session: QuizSession::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn QuizObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Begin a round for `filter` and load its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Transport` if the first fetch fails; the
    /// session is then back to idle and `start` can simply be called again.
    pub async fn start(&mut self, filter: QuizCategoryFilter) -> Result<QuizPhase, QuizServiceError> {
        let request = self.session.start(filter, self.clock.now());
        tracing::info!(%filter, "quiz started");
        self.notify();
        self.run_fetch(request).await
    }

    /// Submit a guess for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` with `InvalidTransition` unless a question
    /// is awaiting an answer.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessResult, QuizServiceError> {
        let result = self
            .session
            .submit_guess(guess)
            .inspect_err(|err| tracing::error!(error = %err, "guess rejected"))?
            .clone();
        tracing::debug!(question = %result.question_id, correct = result.correct, "guess evaluated");
        self.notify();
        Ok(result)
    }

    /// Move past the revealed answer, loading another question unless the round is over.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if no answer is revealed, or
    /// `QuizServiceError::Transport` if the fetch fails. A failed fetch leaves
    /// the session on the revealed answer so the call can be retried.
    pub async fn next_question(&mut self) -> Result<QuizPhase, QuizServiceError> {
        let advance = self
            .session
            .next_question(self.clock.now())
            .inspect_err(|err| tracing::error!(error = %err, "next question rejected"))?;

        match advance {
            Advance::Finished => {
                self.log_finished();
                self.notify();
                Ok(QuizPhase::Finished)
            }
            Advance::Fetch(request) => {
                self.notify();
                self.run_fetch(request).await
            }
        }
    }

    /// Drop the current round and wait for a new category.
    pub fn restart(&mut self) {
        self.session.restart();
        tracing::debug!("quiz restarted");
        self.notify();
    }

    async fn run_fetch(&mut self, request: FetchRequest) -> Result<QuizPhase, QuizServiceError> {
        let result = {
            let guard =
                PendingFetchGuard::new(&mut self.session, &self.observers, request.ticket);
            match self.sequencer.fetch(&request).await {
                Ok(next) => guard
                    .complete(next, self.clock.now())
                    .map_err(QuizServiceError::from),
                Err(err) => {
                    guard.fail();
                    Err(QuizServiceError::from(err))
                }
            }
        };

        match &result {
            Ok(QuizPhase::Finished) => self.log_finished(),
            Ok(_) => {}
            Err(QuizServiceError::Quiz(QuizError::RepeatedQuestion(id))) => {
                tracing::warn!(question = %id, "question source repeated a question");
            }
            Err(_) => {}
        }
        self.notify();
        result
    }

    fn log_finished(&self) {
        if let Some(score) = self.session.score() {
            tracing::info!(
                correct = score.correct,
                answered = score.answered,
                "quiz finished"
            );
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.session_changed(&self.session);
        }
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("session", &self.session)
            .field("observers_len", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// Rolls the session back if the fetch future is dropped before finishing.
///
/// Observers only hear about the rollback from here; a completed fetch is
/// announced by the controller itself.
struct PendingFetchGuard<'a> {
    session: &'a mut QuizSession,
    observers: &'a [Arc<dyn QuizObserver>],
    ticket: Option<FetchTicket>,
}

impl<'a> PendingFetchGuard<'a> {
    fn new(
        session: &'a mut QuizSession,
        observers: &'a [Arc<dyn QuizObserver>],
        ticket: FetchTicket,
    ) -> Self {
        Self {
            session,
            observers,
            ticket: Some(ticket),
        }
    }

    fn roll_back(&mut self, ticket: FetchTicket) {
        if let Err(err) = self.session.fail_advance(ticket) {
            tracing::debug!(error = %err, "rollback skipped");
        }
    }

    fn complete(
        mut self,
        next: NextQuestion,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<QuizPhase, QuizError> {
        let ticket = self.ticket.take().ok_or(QuizError::StaleResponse)?;
        self.session.complete_advance(ticket, next, at)
    }

    fn fail(mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.roll_back(ticket);
        }
    }
}

impl Drop for PendingFetchGuard<'_> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        tracing::debug!("question fetch cancelled");
        self.roll_back(ticket);
        for observer in self.observers {
            observer.session_changed(self.session);
        }
    }
}
