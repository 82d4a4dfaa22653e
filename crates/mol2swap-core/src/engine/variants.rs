use crate::core::models::table::AtomTable;
use itertools::Itertools;
use itertools::structs::Combinations;
use rayon::prelude::*;
use std::vec;

/// One generated molecule: the substituted atom ids and the resulting table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Ids substituted to produce this variant, ascending.
    pub combination: Vec<usize>,
    pub atoms: AtomTable,
}

/// Enumerates atom-type substitutions over subsets of matching atoms.
///
/// Every atom of `from_type` is a candidate. For each requested subset size
/// `k`, in the order the sizes were given, every `k`-combination of the
/// candidate ids is produced in lexicographic order. Each combination yields
/// an independent copy of the input table with those atoms retyped to
/// `to_type`. All subset sizes `1..=n` are requested by default, which
/// amounts to `2^n - 1` variants. Bound `n` or the sizes before enumerating.
#[derive(Debug, Clone)]
pub struct VariantGenerator<'a> {
    table: &'a AtomTable,
    from_type: String,
    to_type: String,
    matching_ids: Vec<usize>,
    sizes: Vec<usize>,
}

impl<'a> VariantGenerator<'a> {
    pub fn new(
        table: &'a AtomTable,
        from_type: impl Into<String>,
        to_type: impl Into<String>,
    ) -> Self {
        let from_type = from_type.into();
        let matching_ids = table.ids_of_type(&from_type);
        let sizes = (1..=matching_ids.len()).collect();
        Self {
            table,
            from_type,
            to_type: to_type.into(),
            matching_ids,
            sizes,
        }
    }

    /// Restricts enumeration to the given subset sizes, visited in order.
    ///
    /// Sizes larger than the number of matching atoms produce nothing; a size
    /// of zero produces one unmodified copy.
    pub fn with_combination_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    pub fn from_type(&self) -> &str {
        &self.from_type
    }

    pub fn to_type(&self) -> &str {
        &self.to_type
    }

    pub fn matching_ids(&self) -> &[usize] {
        &self.matching_ids
    }

    pub fn combination_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// The number of variants [`iter`](Self::iter) will yield, saturating at
    /// `u64::MAX`.
    pub fn expected_count(&self) -> u64 {
        if self.matching_ids.is_empty() {
            return 0;
        }
        let n = self.matching_ids.len() as u64;
        self.sizes
            .iter()
            .fold(0u64, |total, &k| total.saturating_add(binomial(n, k as u64)))
    }

    /// Lazily enumerates the id combinations, in output order.
    pub fn combinations(&self) -> CombinationIter<'_> {
        let sizes: &[usize] = if self.matching_ids.is_empty() {
            &[]
        } else {
            &self.sizes
        };
        CombinationIter {
            matching_ids: &self.matching_ids,
            sizes: sizes.iter(),
            current: None,
        }
    }

    /// Lazily produces the variants. Each call starts a fresh enumeration.
    pub fn iter(&self) -> Variants<'_> {
        Variants {
            generator: self,
            combinations: self.combinations(),
        }
    }

    /// Builds up to `limit` variants on the rayon thread pool.
    ///
    /// The result has the same order as [`iter`](Self::iter). The input table
    /// is only read; each variant is mutated on its own copy.
    pub fn generate_parallel(&self, limit: Option<usize>) -> Vec<Variant> {
        let combinations: Vec<Vec<usize>> = match limit {
            Some(limit) => self.combinations().take(limit).collect(),
            None => self.combinations().collect(),
        };
        combinations
            .into_par_iter()
            .map(|combination| self.build(combination))
            .collect()
    }

    fn build(&self, combination: Vec<usize>) -> Variant {
        let mut atoms = self.table.clone();
        for &id in &combination {
            atoms.retype(id, &self.from_type, &self.to_type);
        }
        Variant { combination, atoms }
    }
}

impl<'g> IntoIterator for &'g VariantGenerator<'_> {
    type Item = Variant;
    type IntoIter = Variants<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the id combinations of a [`VariantGenerator`].
#[derive(Clone)]
pub struct CombinationIter<'g> {
    matching_ids: &'g [usize],
    sizes: std::slice::Iter<'g, usize>,
    current: Option<Combinations<vec::IntoIter<usize>>>,
}

impl Iterator for CombinationIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(combination) = self.current.as_mut().and_then(Iterator::next) {
                return Some(combination);
            }
            let &size = self.sizes.next()?;
            self.current = Some(self.matching_ids.to_vec().into_iter().combinations(size));
        }
    }
}

/// Lazy iterator over the variants of a [`VariantGenerator`].
#[derive(Clone)]
pub struct Variants<'g> {
    generator: &'g VariantGenerator<'g>,
    combinations: CombinationIter<'g>,
}

impl Iterator for Variants<'_> {
    type Item = Variant;

    fn next(&mut self) -> Option<Self::Item> {
        let combination = self.combinations.next()?;
        Some(self.generator.build(combination))
    }
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::table::tests::table_of;

    fn names(table: &AtomTable) -> Vec<String> {
        table.iter().map(Atom::string_id).collect()
    }

    #[test]
    fn single_substitutions_follow_ascending_id_order() {
        let table = table_of(&["C1", "N1", "C2", "C3"]);
        let generator = VariantGenerator::new(&table, "C", "F").with_combination_sizes([1]);
        let variants: Vec<Variant> = generator.iter().collect();

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].combination, vec![1]);
        assert_eq!(names(&variants[0].atoms), vec!["F1", "N1", "C1", "C2"]);
        assert_eq!(variants[1].combination, vec![3]);
        assert_eq!(names(&variants[1].atoms), vec!["C1", "N1", "F1", "C2"]);
        assert_eq!(variants[2].combination, vec![4]);
        assert_eq!(names(&variants[2].atoms), vec!["C1", "N1", "C2", "F1"]);
    }

    #[test]
    fn default_sizes_enumerate_all_non_empty_subsets() {
        let table = table_of(&["C1", "N1", "C2", "C3"]);
        let generator = VariantGenerator::new(&table, "C", "F");

        let combinations: Vec<Vec<usize>> = generator.combinations().collect();
        assert_eq!(
            combinations,
            vec![
                vec![1],
                vec![3],
                vec![4],
                vec![1, 3],
                vec![1, 4],
                vec![3, 4],
                vec![1, 3, 4],
            ]
        );
        assert_eq!(generator.iter().count(), 7);
        assert_eq!(generator.expected_count(), 7);
    }

    #[test]
    fn variant_count_is_two_to_the_n_minus_one() {
        let table = table_of(&["C1", "C2", "O1", "C3", "C4", "C5"]);
        let generator = VariantGenerator::new(&table, "C", "F");
        assert_eq!(generator.iter().count(), 31);
        assert_eq!(generator.expected_count(), 31);
    }

    #[test]
    fn restricted_size_yields_binomial_count() {
        let table = table_of(&["C1", "C2", "O1", "C3", "C4", "C5"]);
        let generator = VariantGenerator::new(&table, "C", "F").with_combination_sizes([2]);
        assert_eq!(generator.iter().count(), 10);
        assert_eq!(generator.expected_count(), 10);
    }

    #[test]
    fn sizes_are_visited_in_given_order() {
        let table = table_of(&["C1", "C2", "C3"]);
        let generator = VariantGenerator::new(&table, "C", "F").with_combination_sizes([3, 1]);
        let combinations: Vec<Vec<usize>> = generator.combinations().collect();
        assert_eq!(combinations, vec![vec![1, 2, 3], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn oversized_and_zero_sizes_follow_binomial_counts() {
        let table = table_of(&["C1", "N1", "C2"]);
        let generator = VariantGenerator::new(&table, "C", "F").with_combination_sizes([0, 5]);

        let variants: Vec<Variant> = generator.iter().collect();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].combination.is_empty());
        assert_eq!(variants[0].atoms, table);
        assert_eq!(generator.expected_count(), 1);
    }

    #[test]
    fn no_matching_atoms_yields_empty_sequence() {
        let table = table_of(&["C1", "N1"]);
        let generator = VariantGenerator::new(&table, "Br", "F").with_combination_sizes([0, 1]);
        assert!(generator.matching_ids().is_empty());
        assert_eq!(generator.iter().count(), 0);
        assert_eq!(generator.expected_count(), 0);
    }

    #[test]
    fn multi_atom_variant_keeps_numbering_consistent() {
        let table = table_of(&["C1", "F1", "C2", "N1", "C3", "F2"]);
        let generator = VariantGenerator::new(&table, "C", "F").with_combination_sizes([2]);

        for variant in &generator {
            variant.atoms.check_local_indices().unwrap();
            assert_eq!(variant.atoms.ids_of_type("F").len(), 4);
        }
        let first = generator.iter().next().unwrap();
        assert_eq!(first.combination, vec![1, 3]);
        assert_eq!(names(&first.atoms), vec!["F1", "F2", "F3", "N1", "C1", "F4"]);
    }

    #[test]
    fn variants_are_independent_of_each_other_and_the_input() {
        let table = table_of(&["C1", "N1", "C2"]);
        let original = table.clone();
        let generator = VariantGenerator::new(&table, "C", "F");

        let mut variants: Vec<Variant> = generator.iter().collect();
        let second_before = variants[1].atoms.clone();
        variants[0].atoms.substitute(2, "O").unwrap();

        assert_eq!(variants[1].atoms, second_before);
        assert_eq!(table, original);
    }

    #[test]
    fn iteration_is_restartable_and_clonable() {
        let table = table_of(&["C1", "C2", "C3"]);
        let generator = VariantGenerator::new(&table, "C", "N");

        let first_pass: Vec<Variant> = generator.iter().collect();
        let second_pass: Vec<Variant> = generator.iter().collect();
        assert_eq!(first_pass, second_pass);

        let mut iter = generator.iter();
        iter.next();
        let forked: Vec<Variant> = iter.clone().collect();
        let rest: Vec<Variant> = iter.collect();
        assert_eq!(forked, rest);
        assert_eq!(rest.len(), 6);
    }

    #[test]
    fn early_termination_bounds_work() {
        let table = table_of(&["C1", "C2", "C3", "C4"]);
        let generator = VariantGenerator::new(&table, "C", "F");
        let taken: Vec<Variant> = generator.iter().take(2).collect();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].combination, vec![2]);
    }

    #[test]
    fn parallel_generation_matches_sequential_order() {
        let table = table_of(&["C1", "N1", "C2", "C3", "O1", "C4"]);
        let generator = VariantGenerator::new(&table, "C", "Cl");

        let sequential: Vec<Variant> = generator.iter().collect();
        assert_eq!(generator.generate_parallel(None), sequential);
        assert_eq!(generator.generate_parallel(Some(5)), sequential[..5].to_vec());
    }

    #[test]
    fn binomial_handles_edges_and_saturates() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(5, 5), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(64, 32), 1_832_624_140_942_590_534);
        assert_eq!(binomial(200, 100), u64::MAX);
    }
}
