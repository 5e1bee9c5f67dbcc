use api::QuestionListing;
use trivia_core::model::{CategoryDirectory, Question, QuestionId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
    pub category_name: String,
    pub difficulty: u8,
}

impl QuestionRowVm {
    fn new(question: &Question, categories: &CategoryDirectory) -> Self {
        let category_name = categories
            .name(question.category_id())
            .map_or_else(|| question.category_id().to_string(), str::to_string);
        Self {
            id: question.id(),
            text: question.text().to_string(),
            answer: question.answer().to_string(),
            category_name,
            difficulty: question.difficulty().value(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionListVm {
    pub rows: Vec<QuestionRowVm>,
    pub total_questions: usize,
    pub current_category: Option<String>,
    pub page: u32,
    pub page_numbers: Vec<u32>,
}

/// Pages needed to show `total` questions, `per_page` at a time.
#[must_use]
pub fn page_count(total: usize, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(per_page as usize);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[must_use]
pub fn page_numbers(total: usize, per_page: u32) -> Vec<u32> {
    (1..=page_count(total, per_page)).collect()
}

/// Page to reload after deleting a question from `page`.
///
/// Stays put while other questions remain on the page, otherwise steps back
/// one page. Never goes below 1.
#[must_use]
pub fn page_after_delete(page: u32, remaining_on_page: usize) -> u32 {
    if remaining_on_page > 0 {
        page.max(1)
    } else {
        page.saturating_sub(1).max(1)
    }
}

/// Map a listing for display. `categories` resolves names when the listing
/// itself carries none, as with search and category browsing.
#[must_use]
pub fn map_question_list(
    listing: &QuestionListing,
    categories: &CategoryDirectory,
    page: u32,
    per_page: u32,
) -> QuestionListVm {
    let categories = listing.categories.as_ref().unwrap_or(categories);
    QuestionListVm {
        rows: listing
            .questions
            .iter()
            .map(|question| QuestionRowVm::new(question, categories))
            .collect(),
        total_questions: listing.total_questions,
        current_category: listing
            .current_category
            .as_ref()
            .map(|category| category.name().to_string()),
        page,
        page_numbers: page_numbers(listing.total_questions, per_page),
    }
}
