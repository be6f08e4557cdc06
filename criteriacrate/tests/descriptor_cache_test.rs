// Descriptor cache tests
// Extraction happens once per type; later lookups return the published descriptor

use std::sync::Arc;
use std::time::{Duration, Instant};

use criteriacrate::filter::StringFilter;
use criteriacrate::metadata::{
    Classification, Declaration, DeclaredMember, MemberKind, MemberValue, extract, is_cached,
};
use criteriacrate::Criteria;

const WIDE_MEMBERS: usize = 2_000;
const CACHED_LOOKUPS: u32 = 1_000;

/// A criteria type with enough members for extraction to be measurable.
struct WideCriteria;

impl Criteria for WideCriteria {
    fn declaration() -> Declaration {
        let members = (0..WIDE_MEMBERS).map(|i| {
            let name: &'static str = Box::leak(format!("member_{i}").into_boxed_str());
            let alias: &'static str = Box::leak(format!(" member{i}.equals ").into_boxed_str());
            DeclaredMember::new(name, "StringFilter", Classification::FilterTyped).alias(alias)
        });
        Declaration::new("WideCriteria").fields(members)
    }

    fn member_value(&self, _: MemberKind, _: &str) -> Option<MemberValue<'_>> {
        None
    }
}

#[derive(Debug, Default, Criteria)]
pub struct SharedCriteria {
    pub name: Option<StringFilter>,
}

#[test]
fn test_first_extraction_is_slower_than_cached_lookups() {
    assert!(!is_cached::<WideCriteria>());

    let start = Instant::now();
    let first = extract::<WideCriteria>().unwrap();
    let first_call = start.elapsed();
    assert_eq!(first.len(), WIDE_MEMBERS);
    assert_eq!(first.fields()[7].param_name(), "member7");

    let start = Instant::now();
    for _ in 0..CACHED_LOOKUPS {
        let cached = extract::<WideCriteria>().unwrap();
        assert!(Arc::ptr_eq(&first, &cached));
    }
    let average = (start.elapsed() / CACHED_LOOKUPS).max(Duration::from_nanos(1));

    assert!(
        first_call >= average * 10,
        "first extraction took {first_call:?}, cached lookups averaged {average:?}"
    );
}

#[test]
fn test_derived_type_descriptor_is_shared_across_threads() {
    let descriptors: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| SharedCriteria::descriptor().unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(is_cached::<SharedCriteria>());
    let published = SharedCriteria::descriptor().unwrap();
    assert!(descriptors.iter().all(|d| Arc::ptr_eq(d, &published)));
    assert_eq!(published.fields().len(), 1);
}
