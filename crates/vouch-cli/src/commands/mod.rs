//! Command implementations.

pub mod audit;
pub mod check;
pub mod config;
pub mod export;

pub use self::audit::execute_audit;
pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::export::execute_export;

/// Verdict of a command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The ledger passes (or the command makes no judgement)
    Pass,
    /// The ledger fails
    Fail,
}

impl Status {
    /// Status for a pass/fail flag.
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            Status::Pass
        } else {
            Status::Fail
        }
    }
}
