#[cfg(test)]
mod tests {
    use crate::clustering::{build_clusters, clustered_record_count, render_report, MatchRecord};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn records(pairs: &[(&str, &str)]) -> Vec<MatchRecord> {
        pairs
            .iter()
            .map(|(input, key)| MatchRecord::new(*input, *key))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_clusters() {
        let clusters = build_clusters(&[]);
        assert!(clusters.is_empty());
        assert_eq!(render_report(&clusters), "");
    }

    #[test]
    fn test_unique_keys_yield_no_clusters() {
        let clusters = build_clusters(&records(&[("A", "K1"), ("B", "K2")]));
        assert!(clusters.is_empty());
        assert_eq!(render_report(&clusters), "");
    }

    #[test]
    fn test_identical_keys_yield_one_cluster() {
        let input = records(&[("A", "K"), ("B", "K"), ("C", "K"), ("D", "K")]);
        let clusters = build_clusters(&input);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].key(), "K");
        assert_eq!(clusters[0].records(), input.as_slice());
    }

    #[test]
    fn test_clusters_ordered_by_key() {
        let clusters = build_clusters(&records(&[
            ("A", "K2"),
            ("B", "K1"),
            ("C", "K2"),
            ("D", "K1"),
        ]));
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].key(), "K1");
        assert_eq!(clusters[1].key(), "K2");
        assert_eq!(
            render_report(&clusters),
            "B,K1\nD,K1\n\nA,K2\nC,K2\n\n"
        );
    }

    #[test]
    fn test_sort_is_stable_within_cluster() {
        let clusters = build_clusters(&records(&[
            ("zeta", "K"),
            ("alpha", "J"),
            ("mu", "K"),
            ("beta", "K"),
            ("omega", "J"),
        ]));
        let k: Vec<&str> = clusters[1]
            .records()
            .iter()
            .map(|r| r.input.as_str())
            .collect();
        assert_eq!(k, vec!["zeta", "mu", "beta"]);
        let j: Vec<&str> = clusters[0]
            .records()
            .iter()
            .map(|r| r.input.as_str())
            .collect();
        assert_eq!(j, vec!["alpha", "omega"]);
    }

    #[test]
    fn test_keys_compared_exactly() {
        // Case and whitespace differences are distinct keys
        let clusters = build_clusters(&records(&[
            ("A", "abc"),
            ("B", "ABC"),
            ("C", "abc "),
            ("D", "abc"),
        ]));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].key(), "abc");
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn test_byte_ordering_of_keys() {
        let clusters = build_clusters(&records(&[
            ("1", "b"),
            ("2", "B"),
            ("3", "b"),
            ("4", "B"),
        ]));
        // Uppercase sorts before lowercase in byte order
        assert_eq!(clusters[0].key(), "B");
        assert_eq!(clusters[1].key(), "b");
    }

    fn arb_records() -> impl Strategy<Value = Vec<MatchRecord>> {
        prop::collection::vec(("[a-z]{1,6}", "k[0-9]{1,2}"), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(input, key)| MatchRecord::new(input, key))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_output_size_matches_repeated_keys(input in arb_records()) {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for record in &input {
                *counts.entry(record.key.as_str()).or_default() += 1;
            }
            let expected: usize = counts.values().filter(|&&n| n >= 2).sum();

            let clusters = build_clusters(&input);
            prop_assert_eq!(clustered_record_count(&clusters), expected);
        }

        #[test]
        fn prop_each_record_in_at_most_one_cluster(input in arb_records()) {
            let clusters = build_clusters(&input);
            for cluster in &clusters {
                prop_assert!(cluster.len() >= 2);
                prop_assert!(cluster.records().iter().all(|r| r.key == cluster.key()));
            }

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for record in &input {
                *counts.entry(record.key.as_str()).or_default() += 1;
            }
            for (key, count) in counts {
                let holding: Vec<_> = clusters.iter().filter(|c| c.key() == key).collect();
                if count >= 2 {
                    prop_assert_eq!(holding.len(), 1);
                    prop_assert_eq!(holding[0].len(), count);
                } else {
                    prop_assert!(holding.is_empty());
                }
            }
        }

        #[test]
        fn prop_clusters_strictly_ascending(input in arb_records()) {
            let clusters = build_clusters(&input);
            for pair in clusters.windows(2) {
                prop_assert!(pair[0].key() < pair[1].key());
            }
        }

        #[test]
        fn prop_idempotent(input in arb_records()) {
            let first = render_report(&build_clusters(&input));
            let second = render_report(&build_clusters(&input));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_same_key_records_keep_input_order(input in arb_records()) {
            for cluster in build_clusters(&input) {
                let expected: Vec<&MatchRecord> =
                    input.iter().filter(|r| r.key == cluster.key()).collect();
                let actual: Vec<&MatchRecord> = cluster.records().iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
