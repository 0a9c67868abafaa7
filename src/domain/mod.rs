pub mod composition;
pub mod models;
mod played;
mod snapshot;

pub use composition::{Composition, CompositionError, CompositionKind, CompositionRecord};
pub use models::*;
pub use played::MatchStatus;
pub use snapshot::ClubSnapshot;
