pub mod groups;
pub mod history;
pub mod lock;
pub mod quota;
pub mod round2;
pub mod types;
pub mod validator;

pub use groups::{structure_for, GroupStructure};
pub use history::{ParticipationIndex, PlayerHistory, TierCounts};
pub use lock::LockPolicy;
pub use quota::QuotaChecker;
pub use types::{Regime, ValidationError, ValidationReport, ViolationKind};
pub use validator::{validate, RoundContext};
