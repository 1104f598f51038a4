use crate::axiom::Axiom;
use crate::formula::Formula;
use crate::parsing::{citations, parse_wff, substitution, WffError};
use thiserror::Error;

const MODUS_PONENS: &str = "MP";
const SUBSTITUTION: &str = "Substitution";

/// Why a proof line claims to hold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Justification {
	Premise,
	Axiom(Axiom),
	/// `MP i j`, citations as written, possibly out of range.
	ModusPonens {
		first: i64,
		second: i64,
	},
	/// `Substitution V=formula`
	Substitution {
		variable: char,
		replacement: Formula,
	},
}

/// A justification that cannot be understood. Format errors invalidate only their own line, `TooDeep` rejects the whole proof.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JustificationError {
	#[error("unknown justification: \"{0}\"")]
	Unknown(String),
	#[error("bad MP justification format: \"{0}\"")]
	BadModusPonens(String),
	#[error("bad substitution justification format: \"{text}\"")]
	BadSubstitution {
		text: String,
		reason: Option<WffError>,
	},
	/// The replacement is well formed but nested past the parser's limit.
	#[error("substitution replacement is nested deeper than {limit} levels")]
	TooDeep {
		limit: usize,
	},
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
	match text.get(..prefix.len()) {
		Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&text[prefix.len()..]),
		_ => None,
	}
}

impl Justification {
	/// Classifies a trimmed justification. `Premise` and axiom names must be the whole text, `MP` and `Substitution` are recognised by prefix. Keywords are case-insensitive.
	pub fn parse(text: &str) -> Result<Justification, JustificationError> {
		if text.eq_ignore_ascii_case("Premise") {
			return Ok(Justification::Premise);
		}
		if let Some(axiom) = Axiom::from_name(text) {
			return Ok(Justification::Axiom(axiom));
		}
		if let Some(arguments) = strip_prefix_ignore_case(text, MODUS_PONENS) {
			let (first, second) = citations(arguments)
				.map_err(|_| JustificationError::BadModusPonens(text.to_string()))?;
			return Ok(Justification::ModusPonens { first, second });
		}
		if let Some(arguments) = strip_prefix_ignore_case(text, SUBSTITUTION) {
			let bad = |reason| JustificationError::BadSubstitution { text: text.to_string(), reason };
			let (variable, replacement) = substitution(arguments).map_err(|_| bad(None))?;
			let replacement = parse_wff(replacement).map_err(|err| match err {
				WffError::TooDeep { limit } => JustificationError::TooDeep { limit },
				err => bad(Some(err)),
			})?;
			return Ok(Justification::Substitution { variable, replacement });
		}
		Err(JustificationError::Unknown(text.to_string()))
	}

	/// Short name for logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Justification::Premise => "premise",
			Justification::Axiom(axiom) => axiom.name(),
			Justification::ModusPonens { .. } => "modus ponens",
			Justification::Substitution { .. } => "substitution",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsing::MAX_DEPTH;

	#[test]
	fn keywords_are_case_insensitive() {
		assert_eq!(Justification::parse("Premise"), Ok(Justification::Premise));
		assert_eq!(Justification::parse("PREMISE"), Ok(Justification::Premise));
		assert_eq!(Justification::parse("ax1"), Ok(Justification::Axiom(Axiom::Ax1)));
		assert_eq!(Justification::parse("mp 1 2"), Ok(Justification::ModusPonens { first: 1, second: 2 }));
		assert_eq!(
			Justification::parse("substitution Q=S"),
			Ok(Justification::Substitution { variable: 'Q', replacement: Formula::Atom('S') })
		);
	}

	#[test]
	fn modus_ponens_arguments() {
		assert_eq!(Justification::parse("MP 3 1"), Ok(Justification::ModusPonens { first: 3, second: 1 }));
		assert_eq!(Justification::parse("MP1 2"), Ok(Justification::ModusPonens { first: 1, second: 2 }));
		assert_eq!(Justification::parse("MP 1 2 because"), Ok(Justification::ModusPonens { first: 1, second: 2 }));
		assert_eq!(Justification::parse("MP 0 9"), Ok(Justification::ModusPonens { first: 0, second: 9 }));
		assert_eq!(Justification::parse("MP 1"), Err(JustificationError::BadModusPonens("MP 1".to_string())));
		assert_eq!(Justification::parse("MP"), Err(JustificationError::BadModusPonens("MP".to_string())));
		assert_eq!(Justification::parse("MP x y"), Err(JustificationError::BadModusPonens("MP x y".to_string())));
	}

	#[test]
	fn substitution_arguments() {
		assert_eq!(
			Justification::parse("Substitution P = c Q R"),
			Ok(Justification::Substitution {
				variable: 'P',
				replacement: Formula::implies(Formula::Atom('Q'), Formula::Atom('R')),
			})
		);
		assert_eq!(
			Justification::parse("Substitution QS"),
			Err(JustificationError::BadSubstitution { text: "Substitution QS".to_string(), reason: None })
		);
		assert_eq!(
			Justification::parse("Substitution Q="),
			Err(JustificationError::BadSubstitution {
				text: "Substitution Q=".to_string(),
				reason: Some(WffError::UnexpectedEnd { position: 0 }),
			})
		);
		assert!(matches!(
			Justification::parse("Substitution Q=cP"),
			Err(JustificationError::BadSubstitution { reason: Some(WffError::UnexpectedEnd { .. }), .. })
		));
	}

	#[test]
	fn replacement_past_nesting_limit() {
		let text = format!("Substitution P={}P", "n".repeat(MAX_DEPTH + 1));
		assert_eq!(Justification::parse(&text), Err(JustificationError::TooDeep { limit: MAX_DEPTH }));

		let text = format!("Substitution P={}P", "n".repeat(MAX_DEPTH));
		assert!(matches!(Justification::parse(&text), Ok(Justification::Substitution { variable: 'P', .. })));
	}

	#[test]
	fn unknown() {
		assert_eq!(Justification::parse("FooBar"), Err(JustificationError::Unknown("FooBar".to_string())));
		assert_eq!(Justification::parse(""), Err(JustificationError::Unknown(String::new())));
		assert_eq!(Justification::parse("AX4"), Err(JustificationError::Unknown("AX4".to_string())));
		assert_eq!(Justification::parse("Premise 2"), Err(JustificationError::Unknown("Premise 2".to_string())));
	}
}
