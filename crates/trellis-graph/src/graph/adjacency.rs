//! Compressed adjacency index used by the solvers.
//!
//! Scanning every edge for each neighbor query is O(E) per vertex; the solvers build this
//! index once per run instead. Arcs keep their insertion order within each vertex's slice.

#[derive(Debug, Clone)]
pub(crate) struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    arcs: Vec<usize>,
}

impl Adjacency {
    /// Builds the index from `(from_ix, to_ix)` arcs over `n` vertices.
    ///
    /// The arc id reported by [`Adjacency::out`] is the arc's position in `arcs`.
    pub(crate) fn from_arcs<I>(n: usize, arcs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let arcs: Vec<(usize, usize)> = arcs.into_iter().collect();
        let mut offsets = vec![0usize; n + 1];
        for &(from, _) in &arcs {
            offsets[from + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![0usize; arcs.len()];
        let mut ids = vec![0usize; arcs.len()];
        for (arc_id, &(from, to)) in arcs.iter().enumerate() {
            let slot = cursor[from];
            targets[slot] = to;
            ids[slot] = arc_id;
            cursor[from] += 1;
        }

        Self {
            offsets,
            targets,
            arcs: ids,
        }
    }

    /// Out-arcs of `v_ix` as `(target_ix, arc_id)` pairs in insertion order.
    pub(crate) fn out(&self, v_ix: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let start = self.offsets[v_ix];
        let end = self.offsets[v_ix + 1];
        self.targets[start..end]
            .iter()
            .copied()
            .zip(self.arcs[start..end].iter().copied())
    }

    /// Targets of the out-arcs of `v_ix`.
    pub(crate) fn targets(&self, v_ix: usize) -> &[usize] {
        &self.targets[self.offsets[v_ix]..self.offsets[v_ix + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::Adjacency;

    #[test]
    fn groups_arcs_by_source_in_insertion_order() {
        let adj = Adjacency::from_arcs(3, [(1, 2), (0, 1), (1, 0), (0, 2)]);
        assert_eq!(adj.out(0).collect::<Vec<_>>(), vec![(1, 1), (2, 3)]);
        assert_eq!(adj.out(1).collect::<Vec<_>>(), vec![(2, 0), (0, 2)]);
        assert!(adj.targets(2).is_empty());
        assert_eq!(adj.targets(1), &[2, 0]);
    }
}
