// the merge consumes its inputs from the front
use std::collections::VecDeque;

// our own stuff that we need
use crate::construct::Thing;
use crate::error::{Result, StratumError};

/// Anything that can take part in a linearization. The only requirement is a
/// stable [`Thing`] identity: the merge uses identities for its duplicate and
/// tail-membership checks, so two nodes with identical content but different
/// identities are different nodes as far as the algorithm is concerned.
pub trait Node: Clone {
    fn identity(&self) -> Thing;
}

// Bare things are their own identity, so ancestor graphs can be linearized
// without constructing any records (handy for tests and benchmarks).
impl Node for Thing {
    fn identity(&self) -> Thing {
        *self
    }
}

/// Computes the C3 linearization of `node` over the graph described by
/// `get_bases`: a total order starting with `node` itself, containing every
/// transitive ancestor exactly once, preserving each node's declared base
/// order, and consistent with every ancestor's own linearization.
///
/// Fails with [`StratumError::InconsistentHierarchy`] when no such order
/// exists, which covers both contradictory base orders and cycles. The error
/// carries the identity of the node whose merge could not be completed.
pub fn linearize<N, F>(node: &N, get_bases: &F) -> Result<Vec<N>>
where
    N: Node,
    F: Fn(&N) -> Vec<N>,
{
    let mut visiting = Vec::new();
    c3(node, get_bases, &mut visiting)
}

fn c3<N, F>(node: &N, get_bases: &F, visiting: &mut Vec<Thing>) -> Result<Vec<N>>
where
    N: Node,
    F: Fn(&N) -> Vec<N>,
{
    // A node reached again while its own linearization is still being
    // computed is its own ancestor. C3 on such a graph never terminates,
    // so the cycle is reported as an inconsistency right here.
    if visiting.contains(&node.identity()) {
        return Err(StratumError::InconsistentHierarchy(node.identity()));
    }
    let bases = get_bases(node);
    if bases.is_empty() {
        return Ok(vec![node.clone()]);
    }
    visiting.push(node.identity());
    let mut sequences: Vec<VecDeque<N>> = Vec::with_capacity(bases.len() + 1);
    for base in &bases {
        sequences.push(c3(base, get_bases, visiting)?.into());
    }
    visiting.pop();
    // the literal base list goes in last, preserving declared order
    sequences.push(bases.into_iter().collect());

    let mut order = vec![node.clone()];
    merge(&mut sequences, &mut order, node.identity())?;
    Ok(order)
}

// Repeatedly appends the first head that sits in no sequence's tail, popping
// it from every sequence where it is the head, until all sequences drain.
// A pass in which every remaining head is blocked by some tail means no
// legal total order exists.
fn merge<N: Node>(sequences: &mut Vec<VecDeque<N>>, order: &mut Vec<N>, at: Thing) -> Result<()> {
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        if sequences.is_empty() {
            return Ok(());
        }
        let candidate = sequences
            .iter()
            .map(|sequence| sequence[0].clone())
            .find(|head| {
                sequences
                    .iter()
                    .all(|sequence| !tail_contains(sequence, head.identity()))
            });
        let Some(candidate) = candidate else {
            return Err(StratumError::InconsistentHierarchy(at));
        };
        let winner = candidate.identity();
        for sequence in sequences.iter_mut() {
            if sequence
                .front()
                .is_some_and(|head| head.identity() == winner)
            {
                sequence.pop_front();
            }
        }
        order.push(candidate);
    }
}

fn tail_contains<N: Node>(sequence: &VecDeque<N>, identity: Thing) -> bool {
    sequence
        .iter()
        .skip(1)
        .any(|node| node.identity() == identity)
}
