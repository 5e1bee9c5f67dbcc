use trivia_core::quiz::QuizSession;

/// Receives the session after every state change, e.g. to re-render.
pub trait QuizObserver: Send + Sync {
    fn session_changed(&self, session: &QuizSession);
}

impl<F> QuizObserver for F
where
    F: Fn(&QuizSession) + Send + Sync,
{
    fn session_changed(&self, session: &QuizSession) {
        self(session);
    }
}
