use trivia_core::model::{CategoryDirectory, QuizCategoryFilter};
use trivia_core::quiz::{QuizPhase, QuizSession};

pub const CORRECT_VERDICT: &str = "You were correct!";
pub const INCORRECT_VERDICT: &str = "You were incorrect";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryChoiceVm {
    pub label: String,
    pub filter: QuizCategoryFilter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub text: String,
    pub category_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealVm {
    pub text: String,
    pub guess: String,
    pub correct: bool,
    pub verdict: &'static str,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalScoreVm {
    pub headline: String,
    pub correct: usize,
    pub answered: usize,
}

/// What a front-end should show for the current quiz state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    ChooseCategory(Vec<CategoryChoiceVm>),
    Loading,
    Question(QuestionVm),
    Reveal(RevealVm),
    FinalScore(FinalScoreVm),
}

/// "ALL" followed by every known category, in id order.
#[must_use]
pub fn map_category_choices(categories: &CategoryDirectory) -> Vec<CategoryChoiceVm> {
    std::iter::once(CategoryChoiceVm {
        label: "ALL".into(),
        filter: QuizCategoryFilter::All,
    })
    .chain(categories.iter().map(|(id, name)| CategoryChoiceVm {
        label: name.to_string(),
        filter: QuizCategoryFilter::Category(id),
    }))
    .collect()
}

#[must_use]
pub fn map_quiz_screen(session: &QuizSession, categories: &CategoryDirectory) -> QuizScreen {
    match session.phase() {
        QuizPhase::Idle => QuizScreen::ChooseCategory(map_category_choices(categories)),
        QuizPhase::Loading => QuizScreen::Loading,
        QuizPhase::Questioning => match session.current_question() {
            Some(question) => {
                let progress = session.progress();
                QuizScreen::Question(QuestionVm {
                    progress_label: format!(
                        "Question {} of {}",
                        progress.answered + 1,
                        progress.round_length
                    ),
                    text: question.text().to_string(),
                    category_name: categories
                        .name(question.category_id())
                        .map(str::to_string),
                })
            }
            None => QuizScreen::Loading,
        },
        QuizPhase::AnswerRevealed => {
            match (session.current_question(), session.last_result()) {
                (Some(question), Some(result)) => QuizScreen::Reveal(RevealVm {
                    text: question.text().to_string(),
                    guess: result.guess.clone(),
                    correct: result.correct,
                    verdict: if result.correct {
                        CORRECT_VERDICT
                    } else {
                        INCORRECT_VERDICT
                    },
                    answer: question.answer().to_string(),
                }),
                _ => QuizScreen::Loading,
            }
        }
        QuizPhase::Finished => {
            let progress = session.progress();
            QuizScreen::FinalScore(FinalScoreVm {
                headline: format!("Your Final Score is {}", progress.correct),
                correct: progress.correct,
                answered: progress.answered,
            })
        }
    }
}
