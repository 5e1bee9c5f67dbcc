mod args;
mod demo;
mod logging;
mod play;
mod terminal;

use std::error::Error;
use std::sync::Arc;

use api::ApiConfig;
use args::{Args, ArgsError, Command, Parsed, print_usage};
use services::{AppServices, Clock, QuestionServiceError};
use trivia_core::model::{CategoryDirectory, QuestionDraft};
use ui::ViewError;
use ui::vm::{map_question_list, page_after_delete};

fn build_services(args: &Args) -> Result<AppServices, Box<dyn Error>> {
    let clock = Clock::default();
    let services = if args.demo {
        tracing::info!("using the built-in demo question bank");
        AppServices::with_api(Arc::new(demo::demo_api()?), clock)
    } else {
        let mut config = ApiConfig::from_env()?;
        if let Some(url) = &args.api_url {
            config = ApiConfig::new(url)?.with_timeout(config.timeout());
        }
        AppServices::new_http(config, clock)?
    };

    match args.per_page {
        Some(per_page) => {
            let questions = services.questions().as_ref().clone().with_per_page(per_page)?;
            Ok(services.with_questions(questions))
        }
        None => Ok(services),
    }
}

/// Turn a service failure into the message the screens would show.
fn report(err: QuestionServiceError) -> Box<dyn Error> {
    tracing::debug!(error = %err, "question request failed");
    Box::new(ViewError::from(&err))
}

async fn list(services: &AppServices, page: u32) -> Result<(), Box<dyn Error>> {
    let questions = services.questions();
    let listing = questions.list_page(page).await.map_err(report)?;
    let vm = map_question_list(&listing, &CategoryDirectory::new(), page, questions.per_page());
    terminal::print_question_list(&vm);
    Ok(())
}

async fn run_command(args: Args) -> Result<(), Box<dyn Error>> {
    let services = build_services(&args)?;
    let questions = services.questions();

    match args.command {
        Command::Play => play::play(&services, args.category).await,
        Command::List => list(&services, args.page.unwrap_or(1)).await,
        Command::Search => {
            let term = args.text();
            let categories = services.categories().list().await?;
            let listing = questions.search(&term).await.map_err(report)?;
            let vm = map_question_list(&listing, &categories, 1, questions.per_page());
            terminal::print_question_list(&vm);
            Ok(())
        }
        Command::Category => {
            let category_id = args.category_id()?;
            let categories = services.categories().list().await?;
            let listing = questions.by_category(category_id).await.map_err(report)?;
            let vm = map_question_list(&listing, &categories, 1, questions.per_page());
            terminal::print_question_list(&vm);
            Ok(())
        }
        Command::Categories => {
            let categories = services.categories().list().await?;
            for (id, name) in categories.iter() {
                println!("{id}: {name}");
            }
            Ok(())
        }
        Command::Add => {
            let draft = QuestionDraft {
                text: args.question.clone().unwrap_or_default(),
                answer: args.answer.clone().unwrap_or_default(),
                category_id: args.category_id()?,
                difficulty: args.difficulty.unwrap_or(1),
            };
            questions.create(draft).await.map_err(report)?;
            println!("Question added.");
            Ok(())
        }
        Command::Delete => {
            let id = args.question_id()?;
            let Some(page) = args.page else {
                questions.delete(id).await.map_err(report)?;
                println!("Deleted question {id}.");
                return Ok(());
            };

            let before = questions.list_page(page).await.map_err(report)?;
            questions.delete(id).await.map_err(report)?;
            println!("Deleted question {id}.");
            let remaining = before
                .questions
                .iter()
                .filter(|question| question.id() != id)
                .count();
            list(&services, page_after_delete(page, remaining)).await
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    logging::init_logger(args.verbose);
    tracing::debug!(command = ?args.command, "starting");
    run_command(args).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
