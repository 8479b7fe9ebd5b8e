mod memory;
mod repository;

pub use memory::InMemorySurveyRepository;
pub use repository::SurveyRepository;
