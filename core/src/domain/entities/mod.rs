//! Domain entities representing core business objects.

pub mod account;
pub mod question;
pub mod session;
pub mod survey;
pub mod verification_token;

pub use account::{Account, AccountRole, AccountView, NewAccount};
pub use question::{Answer, Question};
pub use session::SessionClaims;
pub use survey::Survey;
pub use verification_token::{VerificationToken, CODE_LENGTH, DEFAULT_WINDOW_MINUTES};
