mod question_list_vm;
mod quiz_vm;

pub use question_list_vm::{
    QuestionListVm, QuestionRowVm, map_question_list, page_after_delete, page_count, page_numbers,
};
pub use quiz_vm::{
    CORRECT_VERDICT, CategoryChoiceVm, FinalScoreVm, INCORRECT_VERDICT, QuestionVm, QuizScreen,
    RevealVm, map_category_choices, map_quiz_screen,
};
