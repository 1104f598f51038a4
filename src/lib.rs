pub mod axiom;
pub mod binding;
pub mod check;
pub mod formula;
pub mod justification;
pub mod parsing;
pub mod proof;
pub mod report;
pub mod utils;

pub use crate::check::{verify, CheckerConfig, Checker, CitationOrder, LineError};
pub use crate::formula::Formula;
pub use crate::report::{Rejection, Report, Verdict, Verification};
