use crate::axiom::Axiom;
use crate::binding::substitute;
use crate::formula::Formula;
use crate::justification::{Justification, JustificationError};
use crate::proof::{parse_lines, read_lines, Proof, ProofLine};
use crate::report::{Entry, LineReport, Rejection, Report, Verdict, Verification};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Why a single line does not hold. The other lines are still checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
	#[error(transparent)]
	Justification(#[from] JustificationError),
	#[error("formula is not an instance of {0} ({})", .0.pattern_text())]
	NotAnInstance(Axiom),
	#[error("line {0} does not exist")]
	NoSuchLine(i64),
	#[error("line {cited} is cited before it is proven")]
	ForwardCitation {
		cited: usize,
	},
	#[error("modus ponens on lines {first} and {second} does not give this formula")]
	ModusPonensMismatch {
		first: usize,
		second: usize,
	},
	#[error("no line becomes this formula after substituting {variable} with {replacement}")]
	NoSubstitutionSource {
		variable: char,
		replacement: Formula,
	},
}

/// Which lines a justification may refer to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CitationOrder {
	/// Any line of the proof, including later lines and the line itself.
	Anywhere,
	/// Only lines with a smaller number.
	EarlierOnly,
}

impl Default for CitationOrder {
	fn default() -> Self {
		CitationOrder::Anywhere
	}
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckerConfig {
	pub citation_order: CitationOrder,
}

/// `first, second ⊢ conclusion` by modus ponens, in either order of the premises.
pub fn modus_ponens(conclusion: &Formula, first: &Formula, second: &Formula) -> bool {
	let follows = |minor: &Formula, major: &Formula| {
		major
			.as_implication()
			.map_or(false, |(antecedent, consequent)| antecedent == minor && consequent == conclusion)
	};
	follows(first, second) || follows(second, first)
}

/// First candidate that turns into `current` when `variable` is replaced by `replacement`.
pub fn substitution_source<'p, I>(
	candidates: I,
	current: &Formula,
	variable: char,
	replacement: &Formula,
) -> Option<&'p ProofLine>
where
	I: IntoIterator<Item = &'p ProofLine>,
{
	candidates
		.into_iter()
		.find(|source| substitute(&source.formula, variable, replacement) == *current)
}

/// Checks proofs. Holds only configuration, so one checker can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct Checker {
	config: CheckerConfig,
}

impl Checker {
	pub fn new(config: CheckerConfig) -> Checker {
		Checker { config }
	}

	pub fn config(&self) -> &CheckerConfig {
		&self.config
	}

	fn may_cite(&self, current: &ProofLine, cited: &ProofLine) -> bool {
		match self.config.citation_order {
			CitationOrder::Anywhere => true,
			CitationOrder::EarlierOnly => cited.number < current.number,
		}
	}

	fn cite<'p>(&self, proof: &'p Proof, number: i64) -> Result<&'p ProofLine, LineError> {
		proof.get(number).ok_or(LineError::NoSuchLine(number))
	}

	fn check_order(&self, current: &ProofLine, cited: &ProofLine) -> Result<(), LineError> {
		if self.may_cite(current, cited) {
			Ok(())
		} else {
			Err(LineError::ForwardCitation { cited: cited.number })
		}
	}

	/// Checks one line against the rest of the proof.
	pub fn check_line(&self, proof: &Proof, line: &ProofLine) -> Result<(), LineError> {
		let justification = line.rule.as_ref().map_err(|err| LineError::Justification(err.clone()))?;
		trace!(line = line.number, kind = justification.kind(), "checking line");

		match justification {
			Justification::Premise => Ok(()),
			Justification::Axiom(axiom) => {
				if axiom.is_instance(&line.formula) {
					Ok(())
				} else {
					Err(LineError::NotAnInstance(*axiom))
				}
			},
			Justification::ModusPonens { first, second } => {
				let first = self.cite(proof, *first)?;
				let second = self.cite(proof, *second)?;
				self.check_order(line, first)?;
				self.check_order(line, second)?;

				if modus_ponens(&line.formula, &first.formula, &second.formula) {
					Ok(())
				} else {
					Err(LineError::ModusPonensMismatch { first: first.number, second: second.number })
				}
			},
			Justification::Substitution { variable, replacement } => {
				let candidates = proof.lines().iter().filter(|source| self.may_cite(line, source));
				match substitution_source(candidates, &line.formula, *variable, replacement) {
					Some(source) => {
						debug!(line = line.number, source = source.number, "substitution source found");
						Ok(())
					},
					None => Err(LineError::NoSubstitutionSource { variable: *variable, replacement: replacement.clone() }),
				}
			},
		}
	}

	/// Reads, parses and checks a whole proof. Every piece of state lives in the returned value.
	pub fn verify(&self, input: &str) -> Verification {
		let proof = read_lines(input)
			.map_err(|err| err.map(Rejection::from))
			.and_then(|lines| parse_lines(lines).map_err(|err| err.map(Rejection::from)));
		let proof = match proof {
			Ok(x) => x,
			Err(rejection) => {
				debug!(reason = %rejection.inner, "proof rejected");
				return Verification::rejected(rejection);
			},
		};

		let mut report = Report::default();
		let mut lines = Vec::with_capacity(proof.len());

		for line in proof.lines() {
			let result = self.check_line(&proof, line);
			match &result {
				Ok(()) => debug!(line = line.number, justification = %line.justification, "line holds"),
				Err(err) => debug!(line = line.number, justification = %line.justification, error = %err, "line invalid"),
			}

			if let Err(LineError::Justification(err @ JustificationError::Unknown(_)))
			| Err(LineError::Justification(err @ JustificationError::BadModusPonens(_))) = &result
			{
				report.push(Entry::Note { number: line.number, message: err.to_string() });
			}
			report.push(Entry::Status {
				number: line.number,
				ok: result.is_ok(),
				formula_text: line.formula_text.clone(),
				justification: line.justification.clone(),
			});
			lines.push(LineReport {
				number: line.number,
				formula_text: line.formula_text.clone(),
				justification: line.justification.clone(),
				result,
			});
		}

		let invalid = lines.iter().filter(|line| line.result.is_err()).count();
		info!(lines = lines.len(), invalid, "proof checked");

		Verification {
			report,
			verdict: if invalid == 0 { Verdict::Valid } else { Verdict::Invalid },
			lines,
		}
	}
}

/// Checks a proof with the default configuration.
pub fn verify(input: &str) -> Verification {
	Checker::default().verify(input)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsing::parse_wff;

	fn wff(text: &str) -> Formula {
		parse_wff(text).unwrap()
	}

	fn proof(text: &str) -> Proof {
		parse_lines(read_lines(text).unwrap()).unwrap()
	}

	fn results(checker: &Checker, text: &str) -> Vec<Result<(), LineError>> {
		let proof = proof(text);
		proof.lines().iter().map(|line| checker.check_line(&proof, line)).collect()
	}

	#[test]
	fn modus_ponens_either_order() {
		assert!(modus_ponens(&wff("Q"), &wff("P"), &wff("cPQ")));
		assert!(modus_ponens(&wff("Q"), &wff("cPQ"), &wff("P")));
		assert!(!modus_ponens(&wff("P"), &wff("P"), &wff("cPQ")));
		assert!(!modus_ponens(&wff("Q"), &wff("R"), &wff("cPQ")));
		assert!(!modus_ponens(&wff("Q"), &wff("P"), &wff("nP")));
		assert!(!modus_ponens(&wff("cQP"), &wff("cPcQP"), &wff("cPcQP")));
	}

	#[test]
	fn modus_ponens_lines() {
		let checker = Checker::default();
		let got = results(&checker, "1 P Premise\n2 cPQ Premise\n3 Q MP 2 1\n4 Q MP 1 3\n5 Q MP 0 1\n6 Q MP 1 7");
		assert_eq!(got[2], Ok(()));
		assert_eq!(got[3], Err(LineError::ModusPonensMismatch { first: 1, second: 3 }));
		assert_eq!(got[4], Err(LineError::NoSuchLine(0)));
		assert_eq!(got[5], Err(LineError::NoSuchLine(7)));
	}

	#[test]
	fn axiom_lines() {
		let got = results(&Checker::default(), "1 cPcQP AX1\n2 cPcQQ AX1\n3 cPcQP ax3");
		assert_eq!(got[0], Ok(()));
		assert_eq!(got[1], Err(LineError::NotAnInstance(Axiom::Ax1)));
		assert_eq!(got[2], Err(LineError::NotAnInstance(Axiom::Ax3)));
		assert_eq!(
			LineError::NotAnInstance(Axiom::Ax3).to_string(),
			"formula is not an instance of AX3 (ccnPnQcQP)"
		);
	}

	#[test]
	fn substitution_lines() {
		let got = results(&Checker::default(), "1 cPcQP AX1\n2 cPcncRRP Substitution Q = ncRR\n3 cPcSQ Substitution Q=R");
		assert_eq!(got[0], Ok(()));
		assert_eq!(got[1], Ok(()));
		assert_eq!(got[2], Err(LineError::NoSubstitutionSource { variable: 'Q', replacement: wff("R") }));
	}

	#[test]
	fn citations_may_point_forward_by_default() {
		let checker = Checker::default();
		let got = results(&checker, "1 Q MP 2 3\n2 P Premise\n3 cPQ Premise");
		assert_eq!(got[0], Ok(()));

		// The line itself is a source, so an identity substitution justifies anything.
		let got = results(&checker, "1 cPQ Substitution P=P");
		assert_eq!(got[0], Ok(()));

		let got = results(&checker, "1 cnPA Substitution P=nP\n2 cPA Premise");
		assert_eq!(got[0], Ok(()));
	}

	#[test]
	fn earlier_only_refuses_forward_citations() {
		let checker = Checker::new(CheckerConfig { citation_order: CitationOrder::EarlierOnly });
		let got = results(&checker, "1 Q MP 2 3\n2 P Premise\n3 cPQ Premise\n4 Q MP 2 3\n5 Q MP 5 3");
		assert_eq!(got[0], Err(LineError::ForwardCitation { cited: 2 }));
		assert_eq!(got[3], Ok(()));
		assert_eq!(got[4], Err(LineError::ForwardCitation { cited: 5 }));

		let got = results(&checker, "1 cPQ Substitution P=P");
		assert_eq!(got[0], Err(LineError::NoSubstitutionSource { variable: 'P', replacement: wff("P") }));

		let got = results(&checker, "1 cnPA Substitution P=nP\n2 cPA Premise\n3 cnPA Substitution P=nP");
		assert!(got[0].is_err());
		assert_eq!(got[2], Ok(()));
	}

	#[test]
	fn format_errors_stay_local() {
		let verification = verify("1 P MP one two\n2 P Premise\n3 P Substitution P\n4 P FooBar");
		assert_eq!(verification.verdict, Verdict::Invalid);
		assert_eq!(
			verification.report.to_string(),
			"Line 1: bad MP justification format: \"MP one two\"\n\
			 Line 1: INVALID: P    [MP one two]\n\
			 Line 2: OK: P    [Premise]\n\
			 Line 3: INVALID: P    [Substitution P]\n\
			 Line 4: unknown justification: \"FooBar\"\n\
			 Line 4: INVALID: P    [FooBar]\n"
		);
		assert!(matches!(
			verification.lines[2].result,
			Err(LineError::Justification(JustificationError::BadSubstitution { .. }))
		));
	}
}
