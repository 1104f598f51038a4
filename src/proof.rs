use crate::formula::Formula;
use crate::justification::{Justification, JustificationError};
use crate::parsing::{is_space, parse_wff, WffError, MAX_DEPTH};
use crate::utils::span::{GlobalSpan, Spanned};
use thiserror::Error;

/// Problems with the shape of the proof text. Nothing is checked when one of these occurs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
	#[error("Bad input line (missing line number): {text}")]
	MissingLineNumber {
		text: String,
	},
	#[error("Missing formula on line {number}")]
	MissingFormula {
		number: i64,
	},
	#[error("Line numbers must be consecutive starting at 1 (expected {expected} but got {actual})")]
	WrongNumber {
		expected: usize,
		actual: i64,
	},
	#[error("No proof lines read.")]
	Empty,
}

/// A formula that is not well formed. Stops the run before any checking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Line {number}: formula is not a WFF: \"{formula}\" ({reason})")]
pub struct SyntaxError {
	pub number: usize,
	pub formula: String,
	pub reason: WffError,
}

/// Limits of the checker itself rather than problems with the proof.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InternalError {
	#[error("Line {number}: formula is nested deeper than {limit} levels")]
	TooDeep {
		number: usize,
		limit: usize,
	},
	#[error("Line {number}: substitution replacement is nested deeper than {limit} levels")]
	ReplacementTooDeep {
		number: usize,
		limit: usize,
	},
}

/// Line with its fields separated but the formula not yet parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawProofLine {
	pub number: usize,
	/// Formula token with whitespace removed.
	pub formula_text: String,
	/// Trimmed.
	pub justification: String,
	/// Where the formula token is in the input.
	pub span: GlobalSpan,
	pub justification_span: GlobalSpan,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofLine {
	pub number: usize,
	pub formula_text: String,
	pub formula: Formula,
	pub justification: String,
	/// `justification` classified. Format errors are kept here and reported when the line is checked.
	pub rule: Result<Justification, JustificationError>,
	pub span: GlobalSpan,
	pub justification_span: GlobalSpan,
}

/// Lines numbered exactly `1..=len()`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Proof {
	lines: Vec<ProofLine>,
}

impl Proof {
	pub fn lines(&self) -> &[ProofLine] {
		&self.lines
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Line by its 1-based number.
	pub fn get(&self, number: i64) -> Option<&ProofLine> {
		if number < 1 {
			return None;
		}
		self.lines.get(number as usize - 1)
	}
}

fn trim_start_space(text: &str) -> &str {
	text.trim_start_matches(is_space)
}

/// Splits off a leading optionally signed decimal number, as `%d` would read it.
fn split_number(text: &str) -> Option<(i64, &str)> {
	let sign = if text.starts_with('+') || text.starts_with('-') { 1 } else { 0 };
	let digits = text[sign..].find(|ch: char| !ch.is_ascii_digit()).unwrap_or(text.len() - sign);
	if digits == 0 {
		return None;
	}
	let (number, rest) = text.split_at(sign + digits);
	number.parse().ok().map(|number| (number, rest))
}

/// Byte offset of `part` inside `whole`. `part` must be a subslice of `whole`.
fn offset_in(whole: &str, part: &str) -> usize {
	part.as_ptr() as usize - whole.as_ptr() as usize
}

/// Splits the proof text into numbered lines. Blank lines and lines starting with `#` are skipped.
pub fn read_lines(input: &str) -> Result<Vec<RawProofLine>, Spanned<StructureError>> {
	let mut result = Vec::new();

	for physical in input.split('\n') {
		let content = trim_start_space(physical);
		if content.is_empty() || content.starts_with('#') {
			continue;
		}
		let line_span = {
			let start = offset_in(input, content);
			GlobalSpan(start..start + content.trim_end_matches(is_space).len())
		};

		let (number, rest) = split_number(content).ok_or_else(|| Spanned::new(
			StructureError::MissingLineNumber { text: physical.trim_end_matches('\r').to_string() },
			line_span.clone(),
		))?;
		let number_span = GlobalSpan(line_span.0.start..offset_in(input, rest));

		let rest = trim_start_space(rest);
		if rest.is_empty() {
			return Err(Spanned::new(StructureError::MissingFormula { number }, number_span));
		}
		let token_len = rest.find(is_space).unwrap_or(rest.len());
		let (token, justification) = rest.split_at(token_len);
		let token_start = offset_in(input, token);
		let justification = justification.trim_matches(is_space);
		let justification_start = offset_in(input, justification);

		let expected = result.len() + 1;
		if number != expected as i64 {
			return Err(Spanned::new(StructureError::WrongNumber { expected, actual: number }, number_span));
		}

		result.push(RawProofLine {
			number: expected,
			formula_text: token.chars().filter(|ch| !is_space(*ch)).collect(),
			justification: justification.to_string(),
			span: GlobalSpan(token_start..token_start + token_len),
			justification_span: GlobalSpan(justification_start..justification_start + justification.len()),
		});
	}

	if result.is_empty() {
		return Err(Spanned::new(StructureError::Empty, GlobalSpan(0..0)));
	}
	Ok(result)
}

/// Why the parse phase stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
	Syntax(SyntaxError),
	Internal(InternalError),
}

/// Parses every formula and justification. The first line that is not a WFF, or that is nested past the limit, stops the whole phase.
pub fn parse_lines(lines: Vec<RawProofLine>) -> Result<Proof, Spanned<ParseFailure>> {
	let mut result = Vec::with_capacity(lines.len());

	for RawProofLine { number, formula_text, justification, span, justification_span } in lines {
		let formula = match parse_wff(&formula_text) {
			Ok(x) => x,
			Err(WffError::TooDeep { .. }) => {
				return Err(Spanned::new(ParseFailure::Internal(InternalError::TooDeep { number, limit: MAX_DEPTH }), span));
			},
			Err(reason) => {
				return Err(Spanned::new(ParseFailure::Syntax(SyntaxError { number, formula: formula_text, reason }), span));
			},
		};

		let rule = match Justification::parse(&justification) {
			Err(JustificationError::TooDeep { limit }) => {
				let failure = ParseFailure::Internal(InternalError::ReplacementTooDeep { number, limit });
				return Err(Spanned::new(failure, justification_span));
			},
			rule => rule,
		};

		result.push(ProofLine {
			number,
			formula_text,
			formula,
			justification,
			rule,
			span,
			justification_span,
		});
	}

	Ok(Proof { lines: result })
}
