mod memory;
mod repository;

pub use memory::InMemoryQuestionRepository;
pub use repository::QuestionRepository;
