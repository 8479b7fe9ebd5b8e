mod memory;
mod repository;

pub use memory::InMemoryVerificationTokenRepository;
pub use repository::VerificationTokenRepository;
