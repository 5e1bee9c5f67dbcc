use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api::{InMemoryTriviaApi, QuestionListing, TransportError, TriviaApi};
use async_trait::async_trait;
use services::{AppServices, Clock, QuestionSequencer, QuizController, QuizServiceError};
use trivia_core::model::{
    CategoryDirectory, CategoryId, Difficulty, Question, QuestionId, QuizCategoryFilter,
    ValidatedQuestion,
};
use trivia_core::quiz::{NextQuestion, QuizError, QuizPhase, QuizSession, ROUND_LENGTH};
use trivia_core::time::{fixed_clock, fixed_now};

fn question(id: u64, category: u64, answer: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}?"),
        answer,
        CategoryId::new(category),
        Difficulty::new(3).unwrap(),
    )
}

fn seeded_api() -> InMemoryTriviaApi {
    let categories = CategoryDirectory::from_pairs([
        (CategoryId::new(1), "Science"),
        (CategoryId::new(2), "Art"),
    ])
    .unwrap();
    let mut questions: Vec<Question> = (1..=8)
        .map(|id| question(id, 1, &format!("Answer{id} extra")))
        .collect();
    questions.push(question(20, 2, "Escher"));
    questions.push(question(21, 2, "Jackson Pollock"));
    InMemoryTriviaApi::with_data(categories, questions)
}

fn controller(api: InMemoryTriviaApi) -> QuizController {
    AppServices::with_api(Arc::new(api), fixed_clock()).quiz_controller()
}

fn first_word(answer: &str) -> String {
    answer.split(' ').next().unwrap_or_default().to_string()
}

//
// ─── SCRIPTED SOURCE ───────────────────────────────────────────────────────────
//

enum Step {
    Serve(Question),
    Exhaust,
    Fail,
    Hang,
}

#[derive(Default)]
struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<Vec<QuestionId>>>,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Vec<QuestionId>> {
        self.requests.lock().unwrap().clone()
    }
}

fn unsupported() -> TransportError {
    TransportError::Unavailable("not scripted".into())
}

#[async_trait]
impl TriviaApi for ScriptedSource {
    async fn fetch_categories(&self) -> Result<CategoryDirectory, TransportError> {
        Err(unsupported())
    }

    async fn fetch_questions_page(
        &self,
        _page: u32,
        _per_page: u32,
    ) -> Result<QuestionListing, TransportError> {
        Err(unsupported())
    }

    async fn search_questions(&self, _term: &str) -> Result<QuestionListing, TransportError> {
        Err(unsupported())
    }

    async fn fetch_category_questions(
        &self,
        _category_id: CategoryId,
    ) -> Result<QuestionListing, TransportError> {
        Err(unsupported())
    }

    async fn create_question(&self, _question: &ValidatedQuestion) -> Result<(), TransportError> {
        Err(unsupported())
    }

    async fn delete_question(&self, _id: QuestionId) -> Result<(), TransportError> {
        Err(unsupported())
    }

    async fn fetch_next_quiz_question(
        &self,
        _filter: QuizCategoryFilter,
        seen_ids: &[QuestionId],
    ) -> Result<NextQuestion, TransportError> {
        self.requests.lock().unwrap().push(seen_ids.to_vec());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Serve(question)) => Ok(NextQuestion::Question(question)),
            Some(Step::Exhaust) | None => Ok(NextQuestion::Exhausted),
            Some(Step::Fail) => Err(TransportError::Unavailable("connection reset".into())),
            Some(Step::Hang) => std::future::pending().await,
        }
    }
}

fn scripted_controller(source: &Arc<ScriptedSource>) -> QuizController {
    let api: Arc<dyn TriviaApi> = Arc::clone(source) as Arc<dyn TriviaApi>;
    QuizController::new(QuestionSequencer::new(api), Clock::fixed(fixed_now()))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn full_round_never_repeats_and_finishes_after_five() {
    let mut quiz = controller(seeded_api());
    quiz.start(QuizCategoryFilter::All).await.unwrap();

    let mut served = HashSet::new();
    while !quiz.session().is_finished() {
        let current = quiz.session().current_question().unwrap().clone();
        assert!(
            !quiz.session().seen_ids().contains(&current.id()),
            "question {} served twice",
            current.id()
        );
        assert!(served.insert(current.id()));

        let result = quiz.submit_guess(&first_word(current.answer())).unwrap();
        assert!(result.correct);
        quiz.next_question().await.unwrap();
    }

    let session = quiz.session();
    assert_eq!(session.phase(), QuizPhase::Finished);
    assert_eq!(session.round_index(), ROUND_LENGTH);
    assert_eq!(served.len(), ROUND_LENGTH);
    let score = session.score().unwrap();
    assert_eq!(score.correct, ROUND_LENGTH);
    assert_eq!(score.answered, ROUND_LENGTH);
}

#[tokio::test]
async fn exhausted_category_scores_out_of_answered() {
    let mut quiz = controller(seeded_api());
    quiz.start(QuizCategoryFilter::Category(CategoryId::new(2)))
        .await
        .unwrap();

    let answer = quiz.session().current_question().unwrap().answer().to_string();
    quiz.submit_guess(&first_word(&answer)).unwrap();
    quiz.next_question().await.unwrap();
    quiz.submit_guess("definitely wrong").unwrap();
    let phase = quiz.next_question().await.unwrap();

    assert_eq!(phase, QuizPhase::Finished);
    let score = quiz.session().score().unwrap();
    assert_eq!(score.correct, 1);
    assert_eq!(score.answered, 2);
}

#[tokio::test]
async fn shakespeare_guess_is_correct() {
    let source = ScriptedSource::new(vec![Step::Serve(question(1, 1, "William Shakespeare"))]);
    let mut quiz = scripted_controller(&source);

    quiz.start(QuizCategoryFilter::All).await.unwrap();
    let result = quiz.submit_guess("shakespeare").unwrap();

    assert!(result.correct);
    assert_eq!(quiz.session().correct_count(), 1);
    assert_eq!(quiz.session().phase(), QuizPhase::AnswerRevealed);
}

#[tokio::test]
async fn failed_fetch_keeps_state_and_can_be_retried() {
    let source = ScriptedSource::new(vec![
        Step::Serve(question(1, 1, "one")),
        Step::Fail,
        Step::Serve(question(2, 1, "two")),
    ]);
    let mut quiz = scripted_controller(&source);
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("one").unwrap();

    let err = quiz.next_question().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, QuizServiceError::Transport(_)));
    assert_eq!(quiz.session().phase(), QuizPhase::AnswerRevealed);
    assert_eq!(quiz.session().round_index(), 0);
    assert!(quiz.session().seen_ids().is_empty());
    assert_eq!(quiz.session().correct_count(), 1);

    let phase = quiz.next_question().await.unwrap();
    assert_eq!(phase, QuizPhase::Questioning);
    assert_eq!(quiz.session().seen_ids(), &[QuestionId::new(1)]);
    assert_eq!(
        source.requests(),
        vec![vec![], vec![QuestionId::new(1)], vec![QuestionId::new(1)]]
    );
}

#[tokio::test]
async fn failed_first_fetch_leaves_session_idle() {
    let source = ScriptedSource::new(vec![Step::Fail]);
    let mut quiz = scripted_controller(&source);

    let err = quiz.start(QuizCategoryFilter::All).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(quiz.session().phase(), QuizPhase::Idle);
}

#[tokio::test]
async fn cancelled_fetch_rolls_back() {
    let source = ScriptedSource::new(vec![Step::Serve(question(1, 1, "one")), Step::Hang]);
    let mut quiz = scripted_controller(&source);
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("nope").unwrap();

    let timed_out = tokio::time::timeout(Duration::from_millis(20), quiz.next_question()).await;

    assert!(timed_out.is_err());
    assert_eq!(quiz.session().phase(), QuizPhase::AnswerRevealed);
    assert!(!quiz.session().is_loading());
    assert!(quiz.session().seen_ids().is_empty());
}

#[tokio::test]
async fn cancelled_fetch_tells_observers_about_rollback() {
    let source = ScriptedSource::new(vec![Step::Serve(question(1, 1, "one")), Step::Hang]);
    let mut quiz = scripted_controller(&source);
    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    quiz.subscribe(Arc::new(move |session: &QuizSession| {
        sink.lock().unwrap().push(session.phase());
    }));
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("one").unwrap();

    let timed_out = tokio::time::timeout(Duration::from_millis(20), quiz.next_question()).await;

    assert!(timed_out.is_err());
    let phases = phases.lock().unwrap();
    assert_eq!(
        phases[phases.len() - 2..],
        [QuizPhase::Loading, QuizPhase::AnswerRevealed]
    );
    assert_eq!(phases.last().copied(), Some(quiz.session().phase()));
}

#[tokio::test]
async fn repeated_question_from_source_is_rejected() {
    let source = ScriptedSource::new(vec![
        Step::Serve(question(4, 1, "x")),
        Step::Serve(question(4, 1, "x")),
    ]);
    let mut quiz = scripted_controller(&source);
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("x").unwrap();

    let err = quiz.next_question().await.unwrap_err();

    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::RepeatedQuestion(id)) if id == QuestionId::new(4)
    ));
    assert!(err.is_retryable());
    assert_eq!(quiz.session().phase(), QuizPhase::AnswerRevealed);
}

#[tokio::test]
async fn guess_after_reveal_is_an_invalid_transition() {
    let source = ScriptedSource::new(vec![Step::Serve(question(1, 1, "x"))]);
    let mut quiz = scripted_controller(&source);
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("x").unwrap();

    let err = quiz.submit_guess("x").unwrap_err();

    assert!(!err.is_retryable());
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::InvalidTransition { .. })
    ));
    assert_eq!(quiz.session().correct_count(), 1);
    assert_eq!(quiz.session().round_index(), 0);
}

#[tokio::test]
async fn exhausted_source_finishes_immediately() {
    let source = ScriptedSource::new(vec![Step::Exhaust]);
    let mut quiz = scripted_controller(&source);

    let phase = quiz.start(QuizCategoryFilter::All).await.unwrap();

    assert_eq!(phase, QuizPhase::Finished);
    assert!(quiz.session().current_question().is_none());
    assert_eq!(quiz.session().score().unwrap().answered, 0);
}

#[tokio::test]
async fn observers_see_every_transition() {
    let source = ScriptedSource::new(vec![Step::Serve(question(1, 1, "x")), Step::Exhaust]);
    let mut quiz = scripted_controller(&source);
    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    quiz.subscribe(Arc::new(move |session: &QuizSession| {
        sink.lock().unwrap().push(session.phase());
    }));

    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("x").unwrap();
    quiz.next_question().await.unwrap();
    quiz.restart();

    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            QuizPhase::Loading,
            QuizPhase::Questioning,
            QuizPhase::AnswerRevealed,
            QuizPhase::Loading,
            QuizPhase::Finished,
            QuizPhase::Idle,
        ]
    );
}

#[tokio::test]
async fn restart_then_play_again_starts_fresh() {
    let mut quiz = controller(seeded_api());
    quiz.start(QuizCategoryFilter::All).await.unwrap();
    quiz.submit_guess("whatever").unwrap();

    quiz.restart();
    assert_eq!(quiz.session().phase(), QuizPhase::Idle);

    quiz.start(QuizCategoryFilter::Category(CategoryId::new(2)))
        .await
        .unwrap();
    let session = quiz.session();
    assert_eq!(session.correct_count(), 0);
    assert!(session.seen_ids().is_empty());
    assert_eq!(
        session.current_question().unwrap().category_id(),
        CategoryId::new(2)
    );
}
