//! A `base` field contributes the declaration of a shared criteria type.

use criteriacrate::Criteria;
use criteriacrate::filter::{LocalDateFilter, UuidFilter};

#[derive(Debug, Default, Criteria)]
pub struct AuditCriteria {
    pub id: Option<UuidFilter>,
    pub created: Option<LocalDateFilter>,
}

#[derive(Debug, Default, Criteria)]
pub struct InvoiceCriteria {
    #[criteria(base)]
    pub audit: AuditCriteria,
    #[criteria(include)]
    pub customer: Option<String>,
}

#[derive(Debug, Criteria)]
pub struct Wrapper<T: std::fmt::Display + 'static> {
    #[criteria(include)]
    pub value: T,
}

fn main() {
    let descriptor = InvoiceCriteria::descriptor().unwrap();
    assert!(descriptor.field("created").is_some());
    assert!(descriptor.field("customer").is_some());
    let _ = Wrapper::<u8>::descriptor();
}
