mod memory;
mod repository;

pub use memory::InMemoryAnswerRepository;
pub use repository::AnswerRepository;
