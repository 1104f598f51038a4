use crate::formula::Formula;
use std::collections::BTreeMap;

/// `variable -> value`. The value is borrowed from the formula being matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding<'a> {
	variable: char,
	value: &'a Formula,
}

impl<'a> Binding<'a> {
	pub fn new(variable: char, value: &'a Formula) -> Binding<'a> {
		Binding {
			variable,
			value,
		}
	}
}

/// Bindings of one match attempt. Borrows the target, so it cannot outlive the formula it was taken from.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BindingStorage<'a>(BTreeMap<char, &'a Formula>);

impl<'a> BindingStorage<'a> {
	pub fn single(variable: char, value: &'a Formula) -> BindingStorage<'a> {
		let mut result = BindingStorage::default();
		result.0.insert(variable, value);
		result
	}

	/// Adds a binding. If the variable is already bound, the new value must be structurally equal to the old one, otherwise returns None.
	pub fn add(&mut self, binding: Binding<'a>) -> Option<()> {
		use std::collections::btree_map::Entry::*;

		match self.0.entry(binding.variable) {
			Vacant(vacant) => {
				vacant.insert(binding.value);
				Some(())
			},
			Occupied(occupied) => {
				if *occupied.get() == binding.value {
					Some(())
				} else {
					None
				}
			},
		}
	}

	pub fn get(&self, variable: char) -> Option<&'a Formula> {
		self.0.get(&variable).copied()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Matches `expr` against the pattern `by`, whose atoms are metavariables. Bindings found so far are extended in place; on failure the storage is left partially filled.
pub fn find_bindings<'a>(
	expr: &'a Formula,
	by: &Formula,
	binding_storage: &mut BindingStorage<'a>,
) -> Option<()> {
	use Formula::*;

	match (by, expr) {
		(Atom(variable), _) => {
			binding_storage.add(Binding::new(*variable, expr))
		},
		(Not(by_inner), Not(expr_inner)) => {
			find_bindings(expr_inner, by_inner, binding_storage)
		},
		(Implies(by_left, by_right), Implies(expr_left, expr_right)) => {
			find_bindings(expr_left, by_left, binding_storage)?;
			find_bindings(expr_right, by_right, binding_storage)
		},
		_ => None,
	}
}

/// Bindings under which `pattern` becomes `target`, if there are any.
pub fn match_pattern<'a>(pattern: &Formula, target: &'a Formula) -> Option<BindingStorage<'a>> {
	let mut bindings = BindingStorage::default();
	find_bindings(target, pattern, &mut bindings)?;
	Some(bindings)
}

/// Rebuilds `expr` with every bound atom replaced by a copy of its value. Unbound atoms stay as they are.
pub fn apply_bindings(expr: &Formula, binding_storage: &BindingStorage<'_>) -> Formula {
	use Formula::*;

	match expr {
		Atom(letter) => {
			if let Some(found) = binding_storage.get(*letter) {
				found.clone()
			} else {
				Atom(*letter)
			}
		},
		Not(inner) => Formula::not(apply_bindings(inner, binding_storage)),
		Implies(left, right) => Formula::implies(
			apply_bindings(left, binding_storage),
			apply_bindings(right, binding_storage),
		),
	}
}

/// Replaces every occurrence of the atom `variable` with `replacement`.
pub fn substitute(formula: &Formula, variable: char, replacement: &Formula) -> Formula {
	apply_bindings(formula, &BindingStorage::single(variable, replacement))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsing::parse_wff;

	fn wff(text: &str) -> Formula {
		parse_wff(text).unwrap()
	}

	#[test]
	fn metavariable_binds_any_shape() {
		let pattern = wff("cPcQP");
		let target = wff("cnRccABnR");
		let bindings = match_pattern(&pattern, &target).unwrap();
		assert_eq!(bindings.get('P'), Some(&wff("nR")));
		assert_eq!(bindings.get('Q'), Some(&wff("cAB")));
		assert_eq!(bindings.len(), 2);
	}

	#[test]
	fn repeated_metavariable_must_agree() {
		let pattern = wff("cPcQP");
		assert!(match_pattern(&pattern, &wff("cAcBA")).is_some());
		assert!(match_pattern(&pattern, &wff("cAcBB")).is_none());
		assert!(match_pattern(&pattern, &wff("cnAcBA")).is_none());
	}

	#[test]
	fn operators_must_agree() {
		assert!(match_pattern(&wff("nP"), &wff("cPQ")).is_none());
		assert!(match_pattern(&wff("cPQ"), &wff("nP")).is_none());
		assert!(match_pattern(&wff("cPQ"), &wff("A")).is_none());
		assert!(match_pattern(&wff("P"), &wff("ccAAnB")).is_some());
	}

	#[test]
	fn add_checks_existing_binding() {
		let a = wff("A");
		let a_again = wff("A");
		let b = wff("B");
		let mut storage = BindingStorage::default();
		assert!(storage.is_empty());
		assert_eq!(storage.add(Binding::new('P', &a)), Some(()));
		assert_eq!(storage.add(Binding::new('P', &a_again)), Some(()));
		assert_eq!(storage.add(Binding::new('P', &b)), None);
		assert_eq!(storage.get('P'), Some(&a));
	}

	#[test]
	fn apply_leaves_unbound_atoms() {
		let target = wff("nA");
		let bindings = BindingStorage::single('P', &target);
		assert_eq!(apply_bindings(&wff("cPcQP"), &bindings), wff("cnAcQnA"));
	}

	#[test]
	fn substitute_replaces_every_occurrence() {
		assert_eq!(substitute(&wff("cPcQP"), 'Q', &wff("S")), wff("cPcSP"));
		assert_eq!(substitute(&wff("cPnnP"), 'P', &wff("cAB")), wff("ccABnncAB"));
		assert_eq!(substitute(&wff("cPQ"), 'R', &wff("nR")), wff("cPQ"));
	}
}
