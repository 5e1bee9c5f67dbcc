use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use ui::vm::{CategoryChoiceVm, QuestionListVm, QuizScreen};

/// Line-oriented prompt over stdin.
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    pub async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Yes/no question; an empty answer picks `default`, end of input means no.
    pub async fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        let Some(answer) = self.ask(prompt).await? else {
            return Ok(false);
        };
        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

pub fn print_choices(choices: &[CategoryChoiceVm]) {
    println!("Choose a category:");
    for (index, choice) in choices.iter().enumerate() {
        println!("  {index}) {}", choice.label);
    }
}

pub fn print_screen(screen: &QuizScreen) {
    match screen {
        QuizScreen::ChooseCategory(choices) => print_choices(choices),
        QuizScreen::Loading => println!("Loading..."),
        QuizScreen::Question(vm) => {
            println!();
            match &vm.category_name {
                Some(category) => println!("{} ({category})", vm.progress_label),
                None => println!("{}", vm.progress_label),
            }
            println!("{}", vm.text);
        }
        QuizScreen::Reveal(vm) => {
            println!("{}", vm.verdict);
            println!("Answer: {}", vm.answer);
        }
        QuizScreen::FinalScore(vm) => {
            println!();
            println!("{}", vm.headline);
            println!("({} of {} answered correctly)", vm.correct, vm.answered);
        }
    }
}

pub fn print_question_list(vm: &QuestionListVm) {
    if let Some(category) = &vm.current_category {
        println!("Category: {category}");
    }
    if vm.rows.is_empty() {
        println!("No questions found.");
    }
    for row in &vm.rows {
        println!(
            "[{}] {} ({}, difficulty {})",
            row.id, row.text, row.category_name, row.difficulty
        );
        println!("      answer: {}", row.answer);
    }

    let pages = vm.page_numbers.len();
    if pages > 1 {
        println!(
            "Page {} of {pages}, {} questions in total",
            vm.page, vm.total_questions
        );
    } else {
        println!("{} questions in total", vm.total_questions);
    }
}
