// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::Cube,
    table::{Selection, SelectionRule},
};
use itertools::{Itertools, Position};
use std::{collections::BTreeSet, fmt};

/// The result of minimization: a sum of product terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// The constant-0 function. Produced when there are no minterms to cover.
    Zero,
    /// Product terms in the order they were selected. The same cube never appears twice.
    Sum(Vec<Term>),
}

impl Expression {
    pub(crate) fn from_selections(
        selections: impl IntoIterator<Item = Selection>,
        variable_count: usize,
    ) -> Self {
        let terms = selections
            .into_iter()
            .map(|selection| Term::new(selection, variable_count))
            .collect();
        Self::Sum(terms)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// The selected terms. Empty for [`Expression::Zero`].
    pub fn terms(&self) -> &[Term] {
        match self {
            Self::Zero => &[],
            Self::Sum(terms) => terms,
        }
    }

    /// The textual product terms, in selection order.
    pub fn term_strings(&self) -> Vec<String> {
        self.terms().iter().map(|term| term.text().to_owned()).collect()
    }

    /// Returns true if the expression evaluates to 1 for `value`.
    pub fn evaluate(&self, value: u32) -> bool {
        self.terms().iter().any(|term| term.evaluate(value))
    }

    /// Every value covered by at least one term, including any don't-cares the terms absorbed.
    pub fn covered_values(&self) -> BTreeSet<u32> {
        self.terms()
            .iter()
            .flat_map(|term| term.cube().values())
            .collect()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = match self {
            Self::Sum(terms) if !terms.is_empty() => terms,
            _ => return write!(f, "0"),
        };
        for term in terms.iter().with_position() {
            match term {
                Position::First(term) | Position::Middle(term) => write!(f, "{} + ", term)?,
                Position::Last(term) | Position::Only(term) => write!(f, "{}", term)?,
            }
        }
        Ok(())
    }
}

/// A single product term of an [`Expression`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    cube: Cube,
    covers: BTreeSet<u32>,
    rule: SelectionRule,
    text: String,
}

impl Term {
    fn new(selection: Selection, variable_count: usize) -> Self {
        let rule = selection.rule();
        let implicant = selection.into_implicant();
        let text = implicant
            .cube()
            .algebraic_display()
            .with_variable_count(variable_count)
            .to_string();
        Self {
            cube: implicant.cube().clone(),
            covers: implicant.covers().clone(),
            rule,
            text,
        }
    }

    #[inline]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// The minterms and don't-cares this term was merged from.
    #[inline]
    pub fn covers(&self) -> &BTreeSet<u32> {
        &self.covers
    }

    #[inline]
    pub fn rule(&self) -> SelectionRule {
        self.rule
    }

    /// The product term, such as `A'BD'`. Empty if every variable is a dash.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn evaluate(&self, value: u32) -> bool {
        self.cube.contains_value(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", self.text)
        }
    }
}
