//! Textual representations of spaces, constraints, sets and maps.
//!
//! A [`Printer`] renders each printable type into its buffer; the `Display`
//! impls below delegate to the matching `print_*` method. Types without a
//! printer method expose no textual representation.

use std::fmt;

use crate::algebra::aff::Aff;
use crate::algebra::constraint::{Constraint, ConstraintKind};
use crate::algebra::map::{BasicMap, Map};
use crate::algebra::set::{BasicSet, Set};
use crate::algebra::space::{DimType, Space};

/// String renderer for the crate's printable types.
#[derive(Debug, Default)]
pub struct Printer {
    buffer: String,
}

fn display_name(space: &Space, tp: DimType, idx: usize) -> String {
    if let Some(name) = space.dim_name(tp, idx) {
        return name.to_owned();
    }
    match tp {
        DimType::Param => format!("p{}", idx),
        DimType::In => format!("i{}", idx),
        DimType::Out => format!("o{}", idx),
        DimType::Div => format!("e{}", idx),
        DimType::Cst => "1".to_owned(),
    }
}

fn tuple(space: &Space, tp: DimType) -> String {
    let names: Vec<String> = (0..space.size(tp))
        .map(|i| display_name(space, tp, i))
        .collect();
    format!("[{}]", names.join(", "))
}

impl Printer {
    /// Create a printer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered output.
    pub fn get_str(&self) -> &str {
        &self.buffer
    }

    /// Render a space: `[N] -> { [i, j] }` or `[N] -> { [i] -> [j] }`.
    pub fn print_space(&mut self, space: &Space) -> &mut Self {
        if space.size(DimType::Param) > 0 {
            self.buffer.push_str(&tuple(space, DimType::Param));
            self.buffer.push_str(" -> ");
        }
        self.buffer.push_str("{ ");
        if space.is_map() {
            self.buffer.push_str(&tuple(space, DimType::In));
            self.buffer.push_str(" -> ");
        }
        self.buffer.push_str(&tuple(space, DimType::Out));
        self.buffer.push_str(" }");
        self
    }

    /// Render an affine function as a sum of terms, constant first.
    pub fn print_aff(&mut self, aff: &Aff) -> &mut Self {
        let space = aff.space();
        let mut parts = Vec::new();
        if aff.constant_term() != 0 || aff.is_constant() {
            parts.push(format!("{}", aff.constant_term()));
        }
        for tp in [DimType::In, DimType::Out, DimType::Param, DimType::Div] {
            for i in 0..space.size(tp) {
                // in range by construction
                let c = aff.coefficient(tp, i).unwrap_or(0);
                if c == 0 {
                    continue;
                }
                let name = display_name(space, tp, i);
                match c {
                    1 => parts.push(name),
                    -1 => parts.push(format!("-{}", name)),
                    _ => parts.push(format!("{}*{}", c, name)),
                }
            }
        }
        self.buffer.push_str(&parts.join(" + ").replace("+ -", "- "));
        self
    }

    /// Render a constraint: `<aff> >= 0` or `<aff> = 0`.
    pub fn print_constraint(&mut self, constraint: &Constraint) -> &mut Self {
        self.print_aff(constraint.aff());
        self.buffer.push_str(match constraint.kind() {
            ConstraintKind::Inequality => " >= 0",
            ConstraintKind::Equality => " = 0",
        });
        self
    }

    fn print_conjunction(&mut self, space: &Space, constraints: &[Constraint]) {
        if space.is_map() {
            self.buffer.push_str(&tuple(space, DimType::In));
            self.buffer.push_str(" -> ");
        }
        self.buffer.push_str(&tuple(space, DimType::Out));
        for (i, c) in constraints.iter().enumerate() {
            self.buffer.push_str(if i == 0 { " : " } else { " and " });
            self.print_constraint(c);
        }
    }

    fn print_params(&mut self, space: &Space) {
        if space.size(DimType::Param) > 0 {
            self.buffer.push_str(&tuple(space, DimType::Param));
            self.buffer.push_str(" -> ");
        }
    }

    /// Render a basic set: `{ [i, j] : i >= 0 and j - i >= 0 }`.
    pub fn print_basic_set(&mut self, bset: &BasicSet) -> &mut Self {
        self.print_params(bset.space());
        self.buffer.push_str("{ ");
        self.print_conjunction(bset.space(), &bset.get_constraints());
        self.buffer.push_str(" }");
        self
    }

    /// Render a set, one conjunction per basic set.
    pub fn print_set(&mut self, set: &Set) -> &mut Self {
        self.print_params(set.space());
        self.buffer.push_str("{ ");
        let basics = set.get_basic_sets();
        for (i, b) in basics.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str("; ");
            }
            self.print_conjunction(b.space(), &b.get_constraints());
        }
        self.buffer.push_str(" }");
        self
    }

    /// Render a basic map: `{ [i] -> [j] : j - i >= 0 }`.
    pub fn print_basic_map(&mut self, bmap: &BasicMap) -> &mut Self {
        self.print_params(bmap.space());
        self.buffer.push_str("{ ");
        self.print_conjunction(bmap.space(), &bmap.get_constraints());
        self.buffer.push_str(" }");
        self
    }

    /// Render a map, one conjunction per basic map.
    pub fn print_map(&mut self, map: &Map) -> &mut Self {
        self.print_params(map.space());
        self.buffer.push_str("{ ");
        let basics = map.get_basic_maps();
        for (i, b) in basics.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str("; ");
            }
            self.print_conjunction(b.space(), &b.get_constraints());
        }
        self.buffer.push_str(" }");
        self
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_space(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for Aff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_aff(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_constraint(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for BasicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_basic_set(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_set(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for BasicMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_basic_map(self);
        f.write_str(prn.get_str())
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prn = Printer::new();
        prn.print_map(self);
        f.write_str(prn.get_str())
    }
}
