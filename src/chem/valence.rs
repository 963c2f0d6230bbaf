//! Valence rules for the elements that carry a fixed list of allowed
//! valences. Charged atoms are checked against their isoelectronic
//! neighbour (`[N+]` like C, `[O-]` like F). Elements outside the table
//! (metals, noble gases) are never rejected.

use super::smiles::{Atom, MolGraph};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("atom {atom} ({symbol}) has valence {valence}, allowed: {allowed:?}")]
pub struct ValenceError {
    pub atom: usize,
    pub symbol: &'static str,
    pub valence: u32,
    pub allowed: &'static [u32],
}

fn allowed_valences(atomic_number: i32) -> Option<&'static [u32]> {
    let allowed: &'static [u32] = match atomic_number {
        1 | 9 | 17 | 35 => &[1],
        5 | 7 => &[3],
        6 | 14 => &[4],
        8 => &[2],
        15 | 33 => &[3, 5, 7],
        16 | 34 | 52 => &[2, 4, 6],
        53 => &[1, 3, 5],
        _ => return None,
    };
    Some(allowed)
}

fn symbol(atomic_number: i32) -> &'static str {
    match atomic_number {
        1 => "H",
        5 => "B",
        6 => "C",
        7 => "N",
        8 => "O",
        9 => "F",
        14 => "Si",
        15 => "P",
        16 => "S",
        17 => "Cl",
        33 => "As",
        34 => "Se",
        35 => "Br",
        52 => "Te",
        53 => "I",
        _ => "*",
    }
}

/// Valence list the atom is held to, with the element it was looked up as.
fn rule(atom: &Atom) -> Option<(i32, &'static [u32])> {
    let z = i32::from(atom.atomic_number?) - atom.charge;
    allowed_valences(z).map(|allowed| (z, allowed))
}

/// Valence used by bonds and explicit hydrogens, aromatic bonds counted once.
fn explicit_valence(atom: &Atom) -> u32 {
    atom.bond_valence + atom.hydrogens
}

/// Whether an aromatic atom still needs a double bond inside its aromatic
/// system: pyridine `n` and benzene `c` do, furan `o` and `[nH]` do not.
pub fn needs_double_bond(atom: &Atom) -> bool {
    if !atom.aromatic {
        return false;
    }
    let Some((_, allowed)) = rule(atom) else {
        return false;
    };
    let used = explicit_valence(atom);
    allowed
        .iter()
        .find(|v| **v >= used)
        .is_some_and(|v| v - used >= 1)
}

pub fn check_valence(graph: &MolGraph) -> Result<(), ValenceError> {
    for (index, atom) in graph.atoms.iter().enumerate() {
        let Some((z, allowed)) = rule(atom) else {
            continue;
        };
        let valence = explicit_valence(atom);
        let max = allowed.iter().copied().max().unwrap_or(0);
        if valence > max {
            return Err(ValenceError {
                atom: index,
                symbol: symbol(z),
                valence,
                allowed,
            });
        }
    }
    Ok(())
}
