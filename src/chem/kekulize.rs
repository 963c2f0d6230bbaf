//! Aromaticity check by kekulization.
//!
//! Every aromatic atom that still needs a double bond must be paired with an
//! aromatic neighbour that needs one too. That is a perfect matching on the
//! subgraph of those atoms; `c1cccc1` has five and can never be paired off.
//! Matching is greedy first, then Edmonds' blossom augmentation for whatever
//! greedy left unmatched.

use super::smiles::{BondOrder, MolGraph};
use super::valence::needs_double_bond;
use std::collections::VecDeque;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("cannot kekulize aromatic atom {atom}")]
pub struct KekulizeError {
    pub atom: usize,
}

const NONE: usize = usize::MAX;

pub fn kekulize(graph: &MolGraph) -> Result<(), KekulizeError> {
    // atoms needing a double bond, renumbered densely
    let mut local = vec![NONE; graph.atoms.len()];
    let mut members = Vec::new();
    for (index, atom) in graph.atoms.iter().enumerate() {
        if needs_double_bond(atom) {
            local[index] = members.len();
            members.push(index);
        }
    }
    if members.is_empty() {
        return Ok(());
    }

    let mut adj = vec![Vec::new(); members.len()];
    for bond in &graph.bonds {
        if bond.order != BondOrder::Aromatic {
            continue;
        }
        let (a, b) = (local[bond.a], local[bond.b]);
        if a != NONE && b != NONE {
            adj[a].push(b);
            adj[b].push(a);
        }
    }

    let mut matcher = Matcher::new(&adj);
    matcher.greedy();
    for v in 0..members.len() {
        if matcher.mate[v] != NONE {
            continue;
        }
        match matcher.find_path(v) {
            Some(end) => matcher.augment(end),
            None => return Err(KekulizeError { atom: members[v] }),
        }
    }
    Ok(())
}

struct Matcher<'a> {
    adj: &'a [Vec<usize>],
    mate: Vec<usize>,
    parent: Vec<usize>,
    base: Vec<usize>,
    used: Vec<bool>,
    blossom: Vec<bool>,
    queue: VecDeque<usize>,
}

impl<'a> Matcher<'a> {
    fn new(adj: &'a [Vec<usize>]) -> Self {
        let n = adj.len();
        Self {
            adj,
            mate: vec![NONE; n],
            parent: vec![NONE; n],
            base: (0..n).collect(),
            used: vec![false; n],
            blossom: vec![false; n],
            queue: VecDeque::new(),
        }
    }

    fn greedy(&mut self) {
        let adj = self.adj;
        for v in 0..adj.len() {
            if self.mate[v] != NONE {
                continue;
            }
            if let Some(&to) = adj[v].iter().find(|to| self.mate[**to] == NONE) {
                self.mate[v] = to;
                self.mate[to] = v;
            }
        }
    }

    fn lca(&self, mut a: usize, mut b: usize) -> usize {
        let mut seen = vec![false; self.adj.len()];
        loop {
            a = self.base[a];
            seen[a] = true;
            if self.mate[a] == NONE {
                break;
            }
            a = self.parent[self.mate[a]];
        }
        loop {
            b = self.base[b];
            if seen[b] {
                return b;
            }
            b = self.parent[self.mate[b]];
        }
    }

    fn mark_path(&mut self, mut v: usize, b: usize, mut child: usize) {
        while self.base[v] != b {
            self.blossom[self.base[v]] = true;
            self.blossom[self.base[self.mate[v]]] = true;
            self.parent[v] = child;
            child = self.mate[v];
            v = self.parent[self.mate[v]];
        }
    }

    /// Searches for an augmenting path from the unmatched `root`; returns
    /// the unmatched vertex it ends on.
    fn find_path(&mut self, root: usize) -> Option<usize> {
        let adj = self.adj;
        self.used.fill(false);
        self.parent.fill(NONE);
        for (i, base) in self.base.iter_mut().enumerate() {
            *base = i;
        }
        self.used[root] = true;
        self.queue.clear();
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            for &to in &adj[v] {
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                if to == root || (self.mate[to] != NONE && self.parent[self.mate[to]] != NONE) {
                    let top = self.lca(v, to);
                    self.blossom.fill(false);
                    self.mark_path(v, top, to);
                    self.mark_path(to, top, v);
                    for i in 0..adj.len() {
                        if self.blossom[self.base[i]] {
                            self.base[i] = top;
                            if !self.used[i] {
                                self.used[i] = true;
                                self.queue.push_back(i);
                            }
                        }
                    }
                } else if self.parent[to] == NONE {
                    self.parent[to] = v;
                    if self.mate[to] == NONE {
                        return Some(to);
                    }
                    let next = self.mate[to];
                    self.used[next] = true;
                    self.queue.push_back(next);
                }
            }
        }
        None
    }

    fn augment(&mut self, mut v: usize) {
        while v != NONE {
            let pv = self.parent[v];
            let next = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = next;
        }
    }
}
