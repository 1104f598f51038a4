use std::fmt;

/// Well-formed formula of the implicational calculus with negation.
///
/// Equality is structural: two formulas are equal iff they have the same shape and the same atom letters in the same places. Nothing else in the crate compares formulas.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Formula {
	/// Propositional variable, written as `P`. The parser only produces letters in `A..=Z`; build atoms with [`Formula::atom`] to have that checked in debug builds.
	Atom(char),

	/// Written as `nP`.
	Not(Box<Formula>),

	/// Antecedent and consequent. Written as `cPQ`.
	Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
	pub fn atom(letter: char) -> Formula {
		debug_assert!(letter.is_ascii_uppercase(), "atom must be a letter in A..=Z, got {:?}", letter);
		Formula::Atom(letter)
	}

	pub fn not(inner: Formula) -> Formula {
		Formula::Not(Box::new(inner))
	}

	pub fn implies(left: Formula, right: Formula) -> Formula {
		Formula::Implies(Box::new(left), Box::new(right))
	}

	/// `(antecedent, consequent)` if this is an implication.
	pub fn as_implication(&self) -> Option<(&Formula, &Formula)> {
		match self {
			Formula::Implies(left, right) => Some((left, right)),
			_ => None,
		}
	}

	/// Calls `f` on this formula and on every subformula, parents before children.
	pub fn visit<F>(&self, f: &mut F)
	where
		F: FnMut(&Formula),
	{
		use Formula::*;

		f(self);
		match self {
			Atom(_) => {},
			Not(inner) => inner.visit(f),
			Implies(left, right) => {
				left.visit(f);
				right.visit(f);
			},
		}
	}

	/// Number of occurrences of the atom `letter`.
	pub fn count_atom(&self, letter: char) -> usize {
		let mut count = 0;
		self.visit(&mut |formula| {
			if *formula == Formula::Atom(letter) {
				count += 1;
			}
		});
		count
	}
}

/// Prints the formula back in prefix notation, so `parse_wff(&f.to_string()) == Ok(f)`.
impl fmt::Display for Formula {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use Formula::*;

		match self {
			Atom(letter) => write!(f, "{}", letter),
			Not(inner) => write!(f, "n{}", inner),
			Implies(left, right) => write!(f, "c{}{}", left, right),
		}
	}
}
