//! SMILES reader (OpenSMILES grammar).
//!
//! Turns a SMILES string into a `MolGraph` of atoms and bonds. Atoms,
//! bracket atoms, bonds, branches, ring closures and dot disconnections are
//! checked here; valence and aromaticity live in `valence` and `kekulize`.

use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Deepest branch nesting accepted before the input is rejected.
pub const MAX_BRANCH_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SmilesError {
    #[error("empty SMILES")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParenthesis(usize),

    #[error("branches nested deeper than {0} levels")]
    BranchTooDeep(usize),

    #[error("ring bond {0} is never closed")]
    UnclosedRing(u32),

    #[error("ring bond {0} closes on the atom that opened it")]
    SelfLoop(u32),

    #[error("ring bond {0} has conflicting bond orders")]
    ConflictingRingBond(u32),
}

/// Element symbols in atomic-number order (`ELEMENTS[z - 1]`).
const ELEMENTS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Aromatic symbols allowed inside brackets, two-letter ones first.
const AROMATIC_BRACKET: &[(&str, u8)] = &[
    ("se", 34),
    ("as", 33),
    ("te", 52),
    ("b", 5),
    ("c", 6),
    ("n", 7),
    ("o", 8),
    ("p", 15),
    ("s", 16),
];

const BONDS: &[char] = &['-', '=', '#', '$', ':', '/', '\\'];

fn atomic_number(symbol: &str) -> Option<u8> {
    ELEMENTS
        .iter()
        .position(|s| *s == symbol)
        .and_then(|i| u8::try_from(i + 1).ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '=' => BondOrder::Double,
            '#' => BondOrder::Triple,
            '$' => BondOrder::Quadruple,
            ':' => BondOrder::Aromatic,
            _ => BondOrder::Single,
        }
    }

    /// Contribution to explicit valence; aromatic bonds count as single
    /// until kekulization assigns the double bonds.
    pub fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// `None` for the `*` wildcard.
    pub atomic_number: Option<u8>,
    pub aromatic: bool,
    /// Explicit hydrogen count; always 0 outside brackets.
    pub hydrogens: u32,
    pub charge: i32,
    /// Sum of `BondOrder::valence` over the atom's bonds.
    pub bond_valence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MolGraph {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl MolGraph {
    fn add_bond(&mut self, a: usize, b: usize, symbol: Option<char>) {
        let order = match symbol {
            Some(s) => BondOrder::from_symbol(s),
            None if self.atoms[a].aromatic && self.atoms[b].aromatic => BondOrder::Aromatic,
            None => BondOrder::Single,
        };
        self.atoms[a].bond_valence += order.valence();
        self.atoms[b].bond_valence += order.valence();
        self.bonds.push(Bond { a, b, order });
    }
}

pub fn parse_smiles(input: &str) -> Result<MolGraph, SmilesError> {
    if input.is_empty() {
        return Err(SmilesError::Empty);
    }
    Parser::new(input).run()
}

#[derive(Debug, Clone, Copy)]
struct OpenRing {
    atom: usize,
    bond: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Atom,
    RingBond,
    BranchOpen,
    BranchClose,
}

/// A `(` not yet closed: where it opened and the atom it hangs from.
#[derive(Debug, Clone, Copy)]
struct OpenBranch {
    pos: usize,
    root: usize,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    graph: MolGraph,
    rings: HashMap<u32, OpenRing>,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            graph: MolGraph::default(),
            rings: HashMap::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn unexpected(&self) -> SmilesError {
        match self.peek() {
            Some(ch) => SmilesError::UnexpectedChar { ch, pos: self.pos },
            None => SmilesError::UnexpectedEnd,
        }
    }

    /// Single pass over the input. Branches are tracked on an explicit
    /// stack so nesting depth never grows the call stack.
    fn run(mut self) -> Result<MolGraph, SmilesError> {
        let mut branches: Vec<OpenBranch> = Vec::new();
        let mut current: Option<usize> = None;
        // bond symbol or '.' waiting for the next atom
        let mut pending: Option<char> = None;
        let mut prev = Prev::Start;

        while let Some(ch) = self.peek() {
            match ch {
                '(' => {
                    let Some(root) = current else {
                        return Err(self.unexpected());
                    };
                    if pending.is_some() || prev == Prev::BranchOpen {
                        return Err(self.unexpected());
                    }
                    if branches.len() >= MAX_BRANCH_DEPTH {
                        return Err(SmilesError::BranchTooDeep(MAX_BRANCH_DEPTH));
                    }
                    branches.push(OpenBranch {
                        pos: self.pos,
                        root,
                    });
                    self.bump();
                    if let Some(c) = self.peek().filter(|c| BONDS.contains(c) || *c == '.') {
                        self.bump();
                        pending = Some(c);
                    }
                    prev = Prev::BranchOpen;
                }
                ')' => {
                    if pending.is_some() || prev == Prev::BranchOpen {
                        return Err(self.unexpected());
                    }
                    let Some(branch) = branches.pop() else {
                        return Err(SmilesError::UnbalancedParenthesis(self.pos));
                    };
                    self.bump();
                    current = Some(branch.root);
                    prev = Prev::BranchClose;
                }
                c if c == '.' || BONDS.contains(&c) => {
                    if current.is_none() || pending.is_some() {
                        return Err(self.unexpected());
                    }
                    self.bump();
                    pending = Some(c);
                }
                c if c.is_ascii_digit() || c == '%' => {
                    let Some(atom) = current else {
                        return Err(self.unexpected());
                    };
                    if matches!(prev, Prev::BranchOpen | Prev::BranchClose) || pending == Some('.')
                    {
                        return Err(self.unexpected());
                    }
                    self.ring_bond(atom, pending.take())?;
                    prev = Prev::RingBond;
                }
                _ => {
                    let atom = self.atom()?;
                    if let Some(from) = current.filter(|_| pending != Some('.')) {
                        self.graph.add_bond(from, atom, pending);
                    }
                    pending = None;
                    current = Some(atom);
                    prev = Prev::Atom;
                }
            }
        }

        if pending.is_some() || prev == Prev::BranchOpen || current.is_none() {
            return Err(SmilesError::UnexpectedEnd);
        }
        if let Some(branch) = branches.last() {
            return Err(SmilesError::UnbalancedParenthesis(branch.pos));
        }
        if let Some(ring) = self.rings.keys().min() {
            return Err(SmilesError::UnclosedRing(*ring));
        }
        Ok(self.graph)
    }

    fn ring_bond(&mut self, atom: usize, bond: Option<char>) -> Result<(), SmilesError> {
        let number = match self.bump() {
            Some('%') => {
                let tens = self.bump().and_then(|c| c.to_digit(10));
                let ones = self.bump().and_then(|c| c.to_digit(10));
                match (tens, ones) {
                    (Some(tens), Some(ones)) => tens * 10 + ones,
                    _ => return Err(SmilesError::UnexpectedEnd),
                }
            }
            Some(d) => d.to_digit(10).ok_or(SmilesError::UnexpectedEnd)?,
            None => return Err(SmilesError::UnexpectedEnd),
        };

        match self.rings.remove(&number) {
            Some(open) => {
                if open.atom == atom {
                    return Err(SmilesError::SelfLoop(number));
                }
                let order = match (open.bond, bond) {
                    (Some(a), Some(b))
                        if BondOrder::from_symbol(a) != BondOrder::from_symbol(b) =>
                    {
                        return Err(SmilesError::ConflictingRingBond(number));
                    }
                    (a, b) => a.or(b),
                };
                self.graph.add_bond(open.atom, atom, order);
            }
            None => {
                self.rings.insert(number, OpenRing { atom, bond });
            }
        }
        Ok(())
    }

    fn push_atom(&mut self, atom: Atom) -> usize {
        self.graph.atoms.push(atom);
        self.graph.atoms.len() - 1
    }

    fn atom(&mut self) -> Result<usize, SmilesError> {
        let (symbol, aromatic) = match (self.peek(), self.peek_at(1)) {
            (Some('['), _) => return self.bracket_atom(),
            (Some('*'), _) => {
                self.bump();
                return Ok(self.push_atom(Atom {
                    atomic_number: None,
                    aromatic: false,
                    hydrogens: 0,
                    charge: 0,
                    bond_valence: 0,
                }));
            }
            (Some('C'), Some('l')) => ("Cl", false),
            (Some('B'), Some('r')) => ("Br", false),
            (Some(c @ ('B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I')), _) => {
                (ELEMENTS[organic_index(c)], false)
            }
            (Some(c @ ('b' | 'c' | 'n' | 'o' | 'p' | 's')), _) => {
                (ELEMENTS[organic_index(c.to_ascii_uppercase())], true)
            }
            _ => return Err(self.unexpected()),
        };
        self.pos += symbol.len();

        Ok(self.push_atom(Atom {
            atomic_number: atomic_number(symbol),
            aromatic,
            hydrogens: 0,
            charge: 0,
            bond_valence: 0,
        }))
    }

    fn digits(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            self.bump();
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
        }
        value
    }

    fn bracket_atom(&mut self) -> Result<usize, SmilesError> {
        self.bump();

        // isotope
        self.digits();

        let (atomic_number, aromatic) = self.bracket_symbol()?;

        // chirality: @, @@, or @TH1 style classes
        if self.peek() == Some('@') {
            self.bump();
            if self.peek() == Some('@') {
                self.bump();
            } else if matches!(
                (self.peek(), self.peek_at(1)),
                (Some('T'), Some('H' | 'B'))
                    | (Some('A'), Some('L'))
                    | (Some('S'), Some('P'))
                    | (Some('O'), Some('H'))
            ) {
                self.pos += 2;
                if self.digits().is_none() {
                    return Err(self.unexpected());
                }
            }
        }

        let mut hydrogens = 0;
        if self.peek() == Some('H') {
            self.bump();
            hydrogens = match self.peek().and_then(|c| c.to_digit(10)) {
                Some(d) => {
                    self.bump();
                    d
                }
                None => 1,
            };
        }

        // charge: +, ++, +2, -, --, -2
        let mut charge = 0;
        if let Some(sign @ ('+' | '-')) = self.peek() {
            self.bump();
            let magnitude = if self.peek() == Some(sign) {
                self.bump();
                2
            } else {
                self.digits().unwrap_or(1)
            };
            let magnitude = i32::try_from(magnitude).unwrap_or(i32::MAX);
            charge = if sign == '+' { magnitude } else { -magnitude };
        }

        // atom class
        if self.peek() == Some(':') {
            self.bump();
            if self.digits().is_none() {
                return Err(self.unexpected());
            }
        }

        if self.peek() != Some(']') {
            return Err(self.unexpected());
        }
        self.bump();

        Ok(self.push_atom(Atom {
            atomic_number,
            aromatic,
            hydrogens,
            charge,
            bond_valence: 0,
        }))
    }

    fn bracket_symbol(&mut self) -> Result<(Option<u8>, bool), SmilesError> {
        if self.peek() == Some('*') {
            self.bump();
            return Ok((None, false));
        }

        let first = self.peek().ok_or(SmilesError::UnexpectedEnd)?;
        if first.is_ascii_uppercase() {
            if let Some(second) = self.peek_at(1).filter(char::is_ascii_lowercase) {
                let two: String = [first, second].iter().collect();
                if let Some(z) = atomic_number(&two) {
                    self.pos += 2;
                    return Ok((Some(z), false));
                }
            }
            let one = first.to_string();
            if let Some(z) = atomic_number(&one) {
                self.pos += 1;
                return Ok((Some(z), false));
            }
            return Err(SmilesError::UnknownElement(one));
        }

        if first.is_ascii_lowercase() {
            for (symbol, z) in AROMATIC_BRACKET {
                let matched = symbol
                    .chars()
                    .enumerate()
                    .all(|(i, c)| self.peek_at(i) == Some(c));
                if matched {
                    self.pos += symbol.len();
                    return Ok((Some(*z), true));
                }
            }
            return Err(SmilesError::UnknownElement(first.to_string()));
        }

        Err(self.unexpected())
    }
}

/// Index into `ELEMENTS` of a one-letter organic-subset symbol.
fn organic_index(symbol: char) -> usize {
    match symbol {
        'B' => 4,
        'C' => 5,
        'N' => 6,
        'O' => 7,
        'F' => 8,
        'P' => 14,
        'S' => 15,
        _ => 52, // 'I'
    }
}
