//! Behaviour tests for the field catalog and field references.

mod support;

use std::sync::Arc;
use std::thread;

use ferroscreen_core::{
    CatalogError, Category, FieldCatalog, FieldError, Interval, ScreenerKind, SemanticType,
};
use support::field;

// =============================================================================
// Catalog lookup
// =============================================================================

#[test]
fn when_known_key_is_looked_up_descriptor_metadata_is_returned() {
    // Given: The built-in catalog
    let catalog = FieldCatalog::builtin();

    // When: A fundamental and an indicator are looked up
    let sector = catalog.lookup("SECTOR").expect("builtin field");
    let rsi = catalog.lookup("RELATIVE_STRENGTH_INDEX_14").expect("builtin field");

    // Then: Type, capability and kind restrictions are exposed
    assert_eq!(sector.semantic_type(), SemanticType::Enum);
    assert!(!sector.interval_capable());
    assert!(sector.supports(ScreenerKind::Stock));
    assert!(!sector.supports(ScreenerKind::Crypto));

    assert_eq!(rsi.semantic_type(), SemanticType::Number);
    assert_eq!(rsi.default_interval(), Some(Interval::OneDay));
    assert_eq!(rsi.category(), Category::Oscillators);
}

#[test]
fn when_unknown_key_is_looked_up_error_names_key_and_suggests_match() {
    // Given: The built-in catalog
    let catalog = FieldCatalog::builtin();

    // When: The service's column name is used instead of the symbolic key
    let err = catalog.lookup("rsi").expect_err("not a key");

    // Then: The error carries the requested key and a suggestion
    assert_eq!(
        err,
        CatalogError::UnknownField {
            key: String::from("rsi"),
            suggestion: Some(String::from("RELATIVE_STRENGTH_INDEX_14")),
        }
    );
    assert!(err.to_string().contains("did you mean 'RELATIVE_STRENGTH_INDEX_14'"));
}

#[test]
fn when_nothing_resembles_the_key_no_suggestion_is_made() {
    let err = FieldCatalog::builtin()
        .lookup("QQQQ_NOT_A_FIELD")
        .expect_err("unknown");

    assert!(matches!(
        err,
        CatalogError::UnknownField {
            suggestion: None,
            ..
        }
    ));
}

// =============================================================================
// Search and grouping
// =============================================================================

#[test]
fn when_searching_match_is_case_insensitive_and_ordered_by_key() {
    // Given: The built-in catalog
    let catalog = FieldCatalog::builtin();

    // When: Searching with mixed case
    let results = catalog.search("Relative Strength");

    // Then: Both RSI lengths are found in key order
    let keys: Vec<&str> = results.iter().map(|descriptor| descriptor.key()).collect();
    assert!(keys.contains(&"RELATIVE_STRENGTH_INDEX_14"));
    assert!(keys.contains(&"RELATIVE_STRENGTH_INDEX_7"));
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn when_search_text_is_blank_every_field_is_listed() {
    let catalog = FieldCatalog::builtin();

    assert_eq!(catalog.search("").len(), catalog.len());
}

#[test]
fn when_searching_key_fragments_labels_are_not_required() {
    let results = FieldCatalog::builtin().search("pivot_fibonacci");
    assert_eq!(results.len(), 7);
}

#[test]
fn when_listing_category_only_that_category_is_returned() {
    // Given: The built-in catalog
    let catalog = FieldCatalog::builtin();

    // When: Pivots are listed
    let pivots = catalog.by_category(Category::Pivots);

    // Then: Five methods are present and nothing else leaks in
    assert!(pivots.len() >= 5 * 3);
    assert!(pivots
        .iter()
        .all(|descriptor| descriptor.category() == Category::Pivots));
}

#[test]
fn catalog_is_large_and_keys_are_unique() {
    // Given: The built-in catalog
    let catalog = FieldCatalog::builtin();

    // Then: It covers more than ten thousand fields
    assert!(catalog.len() > 10_000, "catalog has {} fields", catalog.len());

    // And: Keys and wire columns are unique
    let mut keys: Vec<&str> = catalog.all().iter().map(|d| d.key()).collect();
    let before = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), before);

    let mut columns: Vec<&str> = catalog.all().iter().map(|d| d.column()).collect();
    columns.sort_unstable();
    columns.dedup();
    assert_eq!(columns.len(), before);
}

#[test]
fn every_kind_has_a_large_field_set() {
    let catalog = FieldCatalog::builtin();

    for kind in [ScreenerKind::Stock, ScreenerKind::Crypto, ScreenerKind::Forex] {
        let count = catalog.for_kind(kind).count();
        assert!(count > 10_000, "{kind} has {count} fields");
    }
    assert!(
        catalog.for_kind(ScreenerKind::Stock).count()
            > catalog.for_kind(ScreenerKind::Crypto).count()
    );
}

#[test]
fn generated_indicator_lengths_are_interval_capable() {
    // Given: A moving average length outside the classic list
    let wma = field("WEIGHTED_MOVING_AVERAGE_89");

    // When: It is bound to the four hour interval
    let bound = wma.with_interval("240").expect("indicators accept intervals");

    // Then: The wire token carries the length and the interval
    assert_eq!(bound.wire_token(), "WMA89|240");
    assert_eq!(wma.descriptor().category(), Category::MovingAverages);
}

#[test]
fn statement_lines_expand_over_reporting_periods() {
    let catalog = FieldCatalog::builtin();

    let quarterly = catalog.lookup("NET_INCOME_QOQ_GROWTH_FQ").expect("quarterly growth");
    assert_eq!(quarterly.column(), "net_income_qoq_growth_fq");
    assert_eq!(quarterly.semantic_type(), SemanticType::Percent);
    assert!(quarterly.supports(ScreenerKind::Stock));
    assert!(!quarterly.supports(ScreenerKind::Crypto));
    assert!(!quarterly.interval_capable());

    assert!(catalog.lookup("NET_INCOME_QOQ_GROWTH_FY").is_err());
}

#[test]
fn catalog_is_shared_across_threads_without_copies() {
    // Given: Several threads reading the built-in catalog
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let catalog = FieldCatalog::builtin();
                let price = catalog.lookup("PRICE").expect("builtin field");
                (catalog as *const FieldCatalog as usize, Arc::clone(price))
            })
        })
        .collect();

    // When: All reads complete
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("reader thread"))
        .collect();

    // Then: Every thread saw the same instance
    let (first_address, first_price) = &results[0];
    for (address, price) in &results {
        assert_eq!(address, first_address);
        assert!(Arc::ptr_eq(price, first_price));
    }
}

// =============================================================================
// Field references
// =============================================================================

#[test]
fn when_interval_is_bound_to_fundamental_field_it_is_rejected() {
    // Given: A static fundamental
    let sector = field("SECTOR");

    // When: An interval is bound
    let err = sector.with_interval("60").expect_err("sector is not interval-capable");

    // Then: The error names the field and the interval
    assert_eq!(
        err,
        FieldError::IntervalNotSupported {
            key: String::from("SECTOR"),
            interval: Interval::OneHour,
        }
    );
}

#[test]
fn when_interval_code_is_unknown_it_is_rejected() {
    let err = field("RELATIVE_STRENGTH_INDEX_14")
        .with_interval("1h")
        .expect_err("codes are exact");

    assert_eq!(
        err,
        FieldError::InvalidInterval {
            key: String::from("RELATIVE_STRENGTH_INDEX_14"),
            value: String::from("1h"),
        }
    );
}

#[test]
fn when_interval_code_is_unknown_message_names_field_and_code() {
    // Given: An interval-capable field
    let rsi = field("RELATIVE_STRENGTH_INDEX_14");

    // When: A code outside the closed set is bound
    let message = rsi.with_interval("7").expect_err("unknown code").to_string();

    // Then: The message names the field, the code and the accepted codes
    assert!(message.contains("RELATIVE_STRENGTH_INDEX_14"), "{message}");
    assert!(message.contains("'7'"), "{message}");
    assert!(message.contains("1D, 1W, 1M"), "{message}");
}

#[test]
fn binding_interval_returns_new_reference_and_keeps_original() {
    // Given: An unbound RSI reference
    let rsi = field("RELATIVE_STRENGTH_INDEX_14");

    // When: Two intervals are bound
    let hourly = rsi.with_interval("60").expect("valid");
    let daily = rsi.with_interval("1D").expect("valid");

    // Then: The original is untouched and all three are distinct references
    assert_eq!(rsi.interval(), None);
    assert_ne!(rsi, hourly);
    assert_ne!(rsi, daily);
    assert_ne!(hourly, daily);
    assert_eq!(hourly, field("RELATIVE_STRENGTH_INDEX_14").with_interval("60").expect("valid"));
}
