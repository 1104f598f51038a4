use crate::check::LineError;
use crate::proof::{InternalError, ParseFailure, StructureError, SyntaxError};
use crate::utils::span::Spanned;
use colored::Colorize;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Why a proof was refused before any line was checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
	#[error(transparent)]
	Structure(#[from] StructureError),
	#[error(transparent)]
	Syntax(#[from] SyntaxError),
	#[error(transparent)]
	Internal(#[from] InternalError),
}

impl From<ParseFailure> for Rejection {
	fn from(failure: ParseFailure) -> Self {
		match failure {
			ParseFailure::Syntax(x) => Rejection::Syntax(x),
			ParseFailure::Internal(x) => Rejection::Internal(x),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	/// Every line checked out.
	Valid,
	/// All lines were checked, at least one is invalid.
	Invalid,
	/// Nothing was checked.
	Rejected(Spanned<Rejection>),
}

impl Verdict {
	pub fn is_valid(&self) -> bool {
		*self == Verdict::Valid
	}

	/// Process exit status for the verdict.
	pub fn exit_code(&self) -> u8 {
		match self {
			Verdict::Valid => 0,
			Verdict::Invalid => 1,
			Verdict::Rejected(rejection) => match rejection.inner {
				Rejection::Structure(_) => 2,
				Rejection::Syntax(_) => 3,
				Rejection::Internal(_) => 4,
			},
		}
	}
}

/// One message of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
	/// Remark about a line that precedes its status.
	Note {
		number: usize,
		message: String,
	},
	Status {
		number: usize,
		ok: bool,
		formula_text: String,
		justification: String,
	},
	Rejection(String),
}

impl Entry {
	fn render(&self, color: bool) -> String {
		match self {
			Entry::Status { number, ok, formula_text, justification } if color => {
				let status = if *ok { "OK".green().bold() } else { "INVALID".red().bold() };
				format!("Line {}: {}: {}    [{}]", number, status, formula_text, justification)
			},
			Entry::Rejection(message) if color => message.red().to_string(),
			other => other.to_string(),
		}
	}
}

impl fmt::Display for Entry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Entry::Note { number, message } => write!(f, "Line {}: {}", number, message),
			Entry::Status { number, ok, formula_text, justification } => write!(
				f,
				"Line {}: {}: {}    [{}]",
				number,
				if *ok { "OK" } else { "INVALID" },
				formula_text,
				justification,
			),
			Entry::Rejection(message) => f.write_str(message),
		}
	}
}

/// Text report of one verification. Displays as one line per entry, each ending with a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	entries: Vec<Entry>,
}

impl Report {
	pub fn push(&mut self, entry: Entry) {
		self.entries.push(entry);
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Same text as `Display`, with statuses coloured when `color` is set.
	pub fn render(&self, color: bool) -> String {
		self.entries
			.iter()
			.map(|entry| format!("{}\n", entry.render(color)))
			.join("")
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render(false))
	}
}

/// Outcome of checking one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
	pub number: usize,
	pub formula_text: String,
	pub justification: String,
	pub result: Result<(), LineError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
	pub report: Report,
	pub verdict: Verdict,
	/// Empty when the proof was rejected.
	pub lines: Vec<LineReport>,
}

impl Verification {
	pub fn rejected(rejection: Spanned<Rejection>) -> Verification {
		let mut report = Report::default();
		report.push(Entry::Rejection(rejection.inner.to_string()));
		Verification {
			report,
			verdict: Verdict::Rejected(rejection),
			lines: Vec::new(),
		}
	}
}
