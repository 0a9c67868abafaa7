pub mod burnout;
pub mod types;

pub use burnout::{partition, team_burnout};
pub use types::{BurnoutConditions, BurnoutInfo};
