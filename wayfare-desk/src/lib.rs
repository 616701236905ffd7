pub mod app_config;
pub mod clients;
pub mod error;
pub mod session;
pub mod state;

pub use error::DeskError;
pub use session::{run_session, BookingDraft, SessionOutcome, SessionReport};
pub use state::AppState;
