//! Filter fields are picked up without annotation; plain values need `include`.

use criteriacrate::filter::{IntegerFilter, StringFilter};
use criteriacrate::{Criteria, CriteriaDescriptor};

#[derive(Debug, Default, Criteria)]
pub struct ProductCriteria {
    pub name: Option<StringFilter>,
    #[criteria(alias = "cost")]
    pub price: Option<IntegerFilter>,
    #[criteria(include)]
    pub tags: Vec<String>,
    #[criteria(include, element = u32)]
    pub ids: Option<Vec<u32>>,
    #[criteria(ignore)]
    pub internal: Option<StringFilter>,
    pub page: u32,
}

fn main() {
    let descriptor: std::sync::Arc<CriteriaDescriptor> = ProductCriteria::descriptor().unwrap();
    assert_eq!(descriptor.fields().len(), 4);
}
