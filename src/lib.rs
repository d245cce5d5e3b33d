pub mod azure;
pub mod cli;
pub mod provision;
pub mod report;
