use std::error::Error;
use std::sync::Arc;

use services::{AppServices, QuizController, QuizServiceError};
use trivia_core::model::{CategoryDirectory, CategoryId, QuizCategoryFilter};
use trivia_core::quiz::QuizSession;
use ui::ViewError;
use ui::vm::{QuizScreen, map_category_choices, map_quiz_screen};

use crate::terminal::{Input, print_choices, print_screen};

/// Play rounds until the user declines another or input ends.
pub async fn play(
    services: &AppServices,
    category: Option<CategoryId>,
) -> Result<(), Box<dyn Error>> {
    let categories = services.categories().list().await?;
    let mut input = Input::stdin();
    let mut quiz = services.quiz_controller();
    quiz.subscribe(Arc::new(|session: &QuizSession| {
        if session.is_loading() {
            println!("Loading...");
        }
    }));

    let mut preset = category.map(QuizCategoryFilter::Category);
    loop {
        let filter = match preset.take() {
            Some(filter) => filter,
            None => match choose_filter(&categories, &mut input).await? {
                Some(filter) => filter,
                None => return Ok(()),
            },
        };

        if !play_round(&mut quiz, filter, &categories, &mut input).await? {
            return Ok(());
        }
        if !input.confirm("Play again? [y/N] ", false).await? {
            return Ok(());
        }
        quiz.restart();
    }
}

async fn choose_filter(
    categories: &CategoryDirectory,
    input: &mut Input,
) -> Result<Option<QuizCategoryFilter>, Box<dyn Error>> {
    let choices = map_category_choices(categories);
    print_choices(&choices);
    loop {
        let Some(answer) = input.ask("> ").await? else {
            return Ok(None);
        };
        match answer.parse::<usize>().ok().and_then(|i| choices.get(i)) {
            Some(choice) => return Ok(Some(choice.filter)),
            None => println!("Pick a number between 0 and {}.", choices.len() - 1),
        }
    }
}

/// One round from the first fetch to the final score. `false` when the user quit.
async fn play_round(
    quiz: &mut QuizController,
    filter: QuizCategoryFilter,
    categories: &CategoryDirectory,
    input: &mut Input,
) -> Result<bool, Box<dyn Error>> {
    loop {
        match quiz.start(filter).await {
            Ok(_) => break,
            Err(err) => {
                if !offer_retry(&err, input).await? {
                    return Ok(false);
                }
            }
        }
    }

    loop {
        let screen = map_quiz_screen(quiz.session(), categories);
        print_screen(&screen);
        match screen {
            QuizScreen::Question(_) => {
                let Some(guess) = input.ask("Your answer: ").await? else {
                    return Ok(false);
                };
                quiz.submit_guess(&guess)?;
            }
            QuizScreen::Reveal(_) => {
                if input.ask("Press Enter to continue ").await?.is_none() {
                    return Ok(false);
                }
                loop {
                    match quiz.next_question().await {
                        Ok(_) => break,
                        Err(err) => {
                            if !offer_retry(&err, input).await? {
                                return Ok(false);
                            }
                        }
                    }
                }
            }
            QuizScreen::FinalScore(_) => return Ok(true),
            QuizScreen::Loading | QuizScreen::ChooseCategory(_) => {
                return Err("quiz left the round unexpectedly".into());
            }
        }
    }
}

/// Report a failed fetch and ask whether to try again.
async fn offer_retry(err: &QuizServiceError, input: &mut Input) -> Result<bool, Box<dyn Error>> {
    if !err.is_retryable() {
        return Err(err.to_string().into());
    }
    println!("{}", ViewError::from(err));
    Ok(input.confirm("Retry? [Y/n] ", true).await?)
}
