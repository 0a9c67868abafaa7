pub mod eligibility;
pub mod output;
