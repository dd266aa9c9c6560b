//! Merging cache unit tests

use super::MergingCollectionCache;
use crate::backing::{BackingKind, ConfiguredMap};
use crate::config::CacheSettings;
use crate::hooks::KeyPolicy;
use crate::keyed::KeyedCacheBuilder;
use crate::traits::Cache;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

fn key(s: &str) -> String {
    s.to_string()
}

fn list_cache() -> MergingCollectionCache<String, Vec<String>> {
    MergingCollectionCache::new(Vec::new)
}

fn set_cache() -> MergingCollectionCache<String, BTreeSet<String>> {
    MergingCollectionCache::new(BTreeSet::new)
}

#[test]
fn test_list_merge_keeps_order_and_duplicates() {
    let cache = list_cache();

    cache.put(key("P04637"), vec![key("a"), key("b")]);
    cache.put(key("P04637"), vec![key("c")]);
    assert_eq!(
        cache.get(&key("P04637")),
        Some(vec![key("a"), key("b"), key("c")])
    );

    cache.put(key("P04637"), vec![key("a")]);
    assert_eq!(cache.get(&key("P04637")).map(|v| v.len()), Some(4));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_set_merge_deduplicates() {
    let cache = set_cache();

    cache.put(key("GO:0005634"), BTreeSet::from([key("a"), key("b")]));
    cache.put(key("GO:0005634"), BTreeSet::from([key("c"), key("a")]));

    assert_eq!(
        cache.get(&key("GO:0005634")),
        Some(BTreeSet::from([key("a"), key("b"), key("c")]))
    );
}

#[test]
fn test_first_put_builds_container_from_factory() {
    let cache: MergingCollectionCache<String, Vec<u32>> =
        MergingCollectionCache::new(|| Vec::with_capacity(32));

    cache.put(key("ids"), vec![7u32]);

    let stored = cache.get(&key("ids")).unwrap();
    assert_eq!(stored, vec![7]);
}

#[test]
fn test_absent_container_is_dropped() {
    let cache = list_cache();
    cache.put(key("a"), vec![key("x")]);

    cache.put(key("a"), None::<Vec<String>>);
    cache.put(key("b"), None::<Vec<String>>);

    assert_eq!(cache.get(&key("a")), Some(vec![key("x")]));
    assert!(!cache.contains(&key("b")));
    assert_eq!(cache.statistics().skipped_puts, 2);
}

#[test]
fn test_add_single_element() {
    let cache: MergingCollectionCache<String, HashSet<u32>> =
        MergingCollectionCache::new(HashSet::new);

    cache.add(key("taxa"), 9606u32);
    cache.add(key("taxa"), 10090u32);
    cache.add(key("taxa"), 9606u32);

    assert_eq!(
        cache.get(&key("taxa")),
        Some(HashSet::from([9606u32, 10090]))
    );
}

#[test]
fn test_put_all_merges_within_batch() {
    let cache = list_cache();
    cache.put(key("a"), vec![key("1")]);

    cache.put_all(vec![
        (key("a"), Some(vec![key("2")])),
        (key("b"), Some(vec![key("x")])),
        (key("a"), Some(vec![key("3")])),
        (key("c"), None),
    ]);

    assert_eq!(cache.get(&key("a")), Some(vec![key("1"), key("2"), key("3")]));
    assert_eq!(cache.get(&key("b")), Some(vec![key("x")]));
    assert!(!cache.contains(&key("c")));

    let stats = cache.statistics();
    assert_eq!(stats.merges, 2);
    assert_eq!(stats.writes, 2);
    assert_eq!(stats.skipped_puts, 1);
}

#[test]
fn test_merges_use_normalized_key() {
    let cache: MergingCollectionCache<String, Vec<u32>> = KeyedCacheBuilder::new()
        .with_normalizer(KeyPolicy::Uppercase)
        .build_merging(Vec::new);

    cache.put(key("brca1"), vec![1u32]);
    cache.put(key("BRCA1"), vec![2u32]);
    cache.add(key("Brca1"), 3u32);

    assert_eq!(cache.keys(), vec![key("BRCA1")]);
    assert_eq!(cache.get(&key("brca1")), Some(vec![1, 2, 3]));
    assert_eq!(cache.process_key(&key("brca1")), key("BRCA1"));
}

#[test]
fn test_reads_return_copies() {
    let cache = list_cache();
    cache.put(key("a"), vec![key("x")]);

    let mut copy = cache.get(&key("a")).unwrap();
    copy.push(key("y"));

    assert_eq!(cache.get(&key("a")), Some(vec![key("x")]));
}

#[test]
fn test_read_and_remove_delegates() {
    let cache = list_cache();
    cache.put_all(vec![(key("a"), vec![key("1")]), (key("b"), vec![key("2")])]);

    assert!(cache.contains_all(&[key("a"), key("b")]));
    assert_eq!(
        cache.get_many(&[key("b"), key("zz"), key("a")]),
        vec![vec![key("2")], vec![key("1")]]
    );
    assert_eq!(cache.remove(&key("a")), Some(vec![key("1")]));
    assert_eq!(cache.remove(&key("a")), None);

    cache.put(key("b"), vec![key("3")]);
    assert_eq!(cache.snapshot(), vec![(key("b"), vec![key("2"), key("3")])]);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_remove_then_put_starts_fresh_container() {
    let cache = list_cache();
    cache.put(key("a"), vec![key("old")]);
    cache.remove(&key("a"));

    cache.put(key("a"), vec![key("new")]);
    assert_eq!(cache.get(&key("a")), Some(vec![key("new")]));
}

#[test]
fn test_custom_map_factory() {
    let cache: MergingCollectionCache<String, Vec<u32>, BTreeMap<String, Vec<u32>>> =
        MergingCollectionCache::with_factories(BTreeMap::new, Vec::new);

    cache.put(key("z"), vec![1u32]);
    cache.put(key("a"), vec![2u32]);

    assert_eq!(cache.keys(), vec![key("a"), key("z")]);
}

#[test]
fn test_map_factory_error_is_returned_unchanged() {
    let result: Result<MergingCollectionCache<String, Vec<u32>>, String> =
        MergingCollectionCache::try_with_factories(|| Err(key("no arena")), Vec::new);
    assert_eq!(result.unwrap_err(), "no arena");

    let cache: MergingCollectionCache<String, Vec<u32>> =
        MergingCollectionCache::try_with_factories(
            || Ok::<_, String>(HashMap::with_capacity(8)),
            Vec::new,
        )
        .unwrap();
    assert!(cache.is_empty());
}

#[test]
fn test_from_settings() {
    let settings = CacheSettings {
        name: key("annotations"),
        initial_capacity: 4,
        backing: BackingKind::Indexed,
        key_policy: KeyPolicy::Trimmed,
        statistics: false,
    };
    let cache: MergingCollectionCache<String, Vec<u32>, ConfiguredMap<String, Vec<u32>>> =
        MergingCollectionCache::from_settings(&settings, Vec::new);

    cache.put(key(" second "), vec![2u32]);
    cache.put(key("first"), vec![1u32]);
    cache.put(key("second"), vec![3u32]);

    assert_eq!(cache.name(), "annotations");
    assert_eq!(cache.keys(), vec![key("second"), key("first")]);
    assert_eq!(cache.get(&key("second")), Some(vec![2, 3]));
    assert!(!cache.statistics().enabled);
}

#[test]
fn test_usable_through_trait() {
    fn record<C: Cache<String, Vec<u32>>>(cache: &C) {
        cache.put(key("k"), vec![1u32]);
        cache.put(key("k"), vec![2u32]);
    }

    let cache: MergingCollectionCache<String, Vec<u32>> = MergingCollectionCache::new(Vec::new);
    record(&cache);

    assert_eq!(Cache::get(&cache, &key("k")), Some(vec![1, 2]));
    assert_eq!(Cache::len(&cache), 1);
}

#[test]
fn test_clones_share_containers() {
    let cache = set_cache();
    let handle = cache.clone();

    cache.add(key("a"), key("x"));
    handle.add(key("a"), key("y"));

    assert_eq!(
        cache.get(&key("a")),
        Some(BTreeSet::from([key("x"), key("y")]))
    );
}
