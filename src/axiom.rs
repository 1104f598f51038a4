use crate::binding::match_pattern;
use crate::formula::Formula;
use std::fmt;

/// Axiom schemas of the calculus. Atoms of a schema are metavariables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Axiom {
	/// `P → (Q → P)`
	Ax1,
	/// `(S → (P → Q)) → ((S → P) → (S → Q))`
	Ax2,
	/// `(¬P → ¬Q) → (Q → P)`
	Ax3,
}

impl Axiom {
	pub const ALL: [Axiom; 3] = [Axiom::Ax1, Axiom::Ax2, Axiom::Ax3];

	pub fn name(self) -> &'static str {
		match self {
			Axiom::Ax1 => "AX1",
			Axiom::Ax2 => "AX2",
			Axiom::Ax3 => "AX3",
		}
	}

	/// Case-insensitive lookup by name.
	pub fn from_name(name: &str) -> Option<Axiom> {
		Axiom::ALL.iter().copied().find(|axiom| axiom.name().eq_ignore_ascii_case(name))
	}

	/// The schema in prefix notation.
	pub fn pattern_text(self) -> &'static str {
		match self {
			Axiom::Ax1 => "cPcQP",
			Axiom::Ax2 => "ccScPQccSPcSQ",
			Axiom::Ax3 => "ccnPnQcQP",
		}
	}

	pub fn pattern(self) -> Formula {
		let p = Formula::atom('P');
		let q = Formula::atom('Q');
		let s = Formula::atom('S');
		let implies = Formula::implies;

		match self {
			Axiom::Ax1 => implies(p.clone(), implies(q, p)),
			Axiom::Ax2 => implies(
				implies(s.clone(), implies(p.clone(), q.clone())),
				implies(implies(s.clone(), p), implies(s, q)),
			),
			Axiom::Ax3 => implies(
				implies(Formula::not(p.clone()), Formula::not(q.clone())),
				implies(q, p),
			),
		}
	}

	pub fn is_instance(self, formula: &Formula) -> bool {
		match_pattern(&self.pattern(), formula).is_some()
	}
}

impl fmt::Display for Axiom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
