//! Settings loading wired through to cache construction

use memo_cache::{
    BackingKind, Cache, CacheSettingsLoader, ConfigSource, ConfiguredMap, KeyPolicy, KeyedCache,
    MergingCollectionCache,
};
use memo_core::constants::{
    MEMO_CACHE_BACKING_VAR, MEMO_CACHE_CONFIG_VAR, MEMO_CACHE_INITIAL_CAPACITY_VAR,
    MEMO_CACHE_KEY_POLICY_VAR, MEMO_CACHE_NAME_VAR, MEMO_CACHE_STATISTICS_VAR,
};
use serial_test::serial;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn clear_env() {
    for var in [
        MEMO_CACHE_CONFIG_VAR,
        MEMO_CACHE_NAME_VAR,
        MEMO_CACHE_INITIAL_CAPACITY_VAR,
        MEMO_CACHE_BACKING_VAR,
        MEMO_CACHE_KEY_POLICY_VAR,
        MEMO_CACHE_STATISTICS_VAR,
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_loaded_settings_drive_keyed_cache() {
    let _ = memo_utils::init_with_directive("memo_cache=trace");
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let settings_file = temp_dir.path().join("memo.json");
    fs::write(
        &settings_file,
        r#"{
            "cache": {
                "name": "uniprot",
                "backing": "ordered",
                "key_policy": "trimmed_lowercase"
            }
        }"#,
    )
    .unwrap();
    std::env::set_var(MEMO_CACHE_CONFIG_VAR, &settings_file);

    let config = CacheSettingsLoader::load().unwrap();
    clear_env();
    assert_eq!(config.source, ConfigSource::ConfigFile(settings_file));

    let cache: KeyedCache<String, String, ConfiguredMap<String, String>> =
        KeyedCache::from_settings(&config.settings);
    cache.put(" P38398 ".to_string(), "BRCA1_HUMAN".to_string());
    cache.put("P04637".to_string(), "P53_HUMAN".to_string());

    assert_eq!(cache.name(), "uniprot");
    assert_eq!(cache.keys(), vec!["p04637".to_string(), "p38398".to_string()]);
    assert!(cache.contains_all(&["P38398".to_string(), "p04637 ".to_string()]));
}

#[test]
#[serial]
fn test_environment_selects_merging_backing() {
    // RUST_LOG-driven setup; a subscriber from another test may already be installed
    let _ = memo_utils::init();
    clear_env();
    std::env::set_var(MEMO_CACHE_NAME_VAR, "go-terms");
    std::env::set_var(MEMO_CACHE_BACKING_VAR, "indexed");
    std::env::set_var(MEMO_CACHE_KEY_POLICY_VAR, "uppercase");
    std::env::set_var(MEMO_CACHE_INITIAL_CAPACITY_VAR, "64");

    let config = CacheSettingsLoader::load().unwrap();
    clear_env();

    assert!(matches!(config.source, ConfigSource::EnvironmentVariable(_)));
    assert_eq!(config.settings.backing, BackingKind::Indexed);
    assert_eq!(config.settings.key_policy, KeyPolicy::Uppercase);
    assert_eq!(config.settings.initial_capacity, 64);

    let cache: MergingCollectionCache<String, BTreeSet<String>, ConfiguredMap<String, BTreeSet<String>>> =
        MergingCollectionCache::from_settings(&config.settings, BTreeSet::new);
    cache.put("tp53".to_string(), BTreeSet::from(["GO:0006915".to_string()]));
    cache.put("brca1".to_string(), BTreeSet::from(["GO:0006281".to_string()]));
    cache.add("TP53".to_string(), "GO:0006915".to_string());

    assert_eq!(cache.keys(), vec!["TP53".to_string(), "BRCA1".to_string()]);
    assert_eq!(
        Cache::get(&cache, &"Tp53".to_string()).map(|terms| terms.len()),
        Some(1)
    );
    assert_eq!(cache.statistics().merges, 1);
}
