mod memory;
mod repository;

pub use memory::InMemoryAccountRepository;
pub use repository::AccountRepository;
