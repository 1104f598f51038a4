use crate::formula::Formula;
use thiserror::Error;

/// Formulas nested deeper than this are refused before the recursive parser runs.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WffError {
	#[error("formula ends at {position} where an operand is expected")]
	UnexpectedEnd {
		position: usize,
	},
	#[error("unexpected `{found}` at {position}")]
	UnexpectedCharacter {
		found: char,
		position: usize,
	},
	#[error("unexpected `{found}` at {position} after a complete formula")]
	TrailingInput {
		found: char,
		position: usize,
	},
	#[error("formula is nested deeper than {limit} levels")]
	TooDeep {
		limit: usize,
	},
}

/// Whitespace as the C locale sees it.
pub fn is_space(ch: char) -> bool {
	matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

peg::parser!(
	grammar wff() for str {
		// One formula at the start of the input, the rest is left alone.
		pub rule wff_prefix() -> (Formula, usize)
			= _ formula:wff() end:position!() [_]* { (formula, end) }

		rule wff() -> Formula
			= letter:['A'..='Z'] { Formula::atom(letter) }
			/ "n" _ inner:wff() { Formula::not(inner) }
			/ "c" _ left:wff() _ right:wff() { Formula::implies(left, right) }

		// Arguments of `MP`: two line numbers, anything after them is ignored.
		pub rule citations() -> (i64, i64)
			= _ first:integer() _ second:integer() [_]* { (first, second) }

		// Arguments of `Substitution`: `V = formula`.
		pub rule substitution() -> (char, &'input str)
			= _ variable:['A'..='Z'] _ "=" _ replacement:$([_]*) { (variable, replacement) }

		rule integer() -> i64
			= n:$(['+' | '-']? ['0'..='9']+) {? n.parse().or(Err("line number")) }

		rule _() = quiet!{[' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C']*}
	}
);

pub use self::wff::{citations, substitution};

/// Deepest chain of pending `n`/`c` operators in the formula starting at `text`, computed without recursion.
fn nesting_depth(text: &str) -> usize {
	let mut pending: Vec<u8> = Vec::new();
	let mut deepest = 0;
	for ch in text.chars().filter(|ch| !is_space(*ch)) {
		match ch {
			'n' => pending.push(1),
			'c' => pending.push(2),
			'A'..='Z' => {
				while let Some(operands) = pending.pop() {
					if operands > 1 {
						pending.push(operands - 1);
						break;
					}
				}
			},
			_ => break,
		}
		deepest = deepest.max(pending.len());
		if pending.is_empty() {
			break;
		}
	}
	deepest
}

/// Parses the formula starting at byte `position`, skipping whitespace before it. Returns the formula and the position right after it.
pub fn parse_wff_at(text: &str, position: usize) -> Result<(Formula, usize), WffError> {
	let rest = text.get(position..).ok_or(WffError::UnexpectedEnd { position })?;

	if nesting_depth(rest) > MAX_DEPTH {
		return Err(WffError::TooDeep { limit: MAX_DEPTH });
	}

	wff::wff_prefix(rest)
		.map(|(formula, end)| (formula, position + end))
		.map_err(|err| {
			let offset = err.location.offset;
			match rest[offset..].chars().next() {
				Some(found) => WffError::UnexpectedCharacter { found, position: position + offset },
				None => WffError::UnexpectedEnd { position: position + offset },
			}
		})
}

/// Parses `text` as exactly one formula surrounded by nothing but whitespace.
pub fn parse_wff(text: &str) -> Result<Formula, WffError> {
	let (formula, end) = parse_wff_at(text, 0)?;
	match text[end..].char_indices().find(|(_, ch)| !is_space(*ch)) {
		Some((offset, found)) => Err(WffError::TrailingInput { found, position: end + offset }),
		None => Ok(formula),
	}
}

pub fn is_wff(text: &str) -> bool {
	parse_wff(text).is_ok()
}
