//! Accessor methods declared through `#[criteria_methods]`.

use criteriacrate::filter::StringFilter;
use criteriacrate::{Criteria, criteria_methods};

#[derive(Debug, Default, Criteria)]
#[criteria(methods)]
pub struct OrderCriteria {
    pub reference: Option<StringFilter>,
    quantities: Vec<u32>,
}

#[criteria_methods]
impl OrderCriteria {
    #[criteria(include)]
    pub fn get_total(&self) -> u32 {
        self.quantities.iter().sum()
    }

    #[criteria(alias = "lines")]
    pub fn quantities(&self) -> Vec<u32> {
        self.quantities.clone()
    }

    #[criteria(include)]
    pub fn first(&self) -> Option<u32> {
        self.quantities.first().copied()
    }

    #[criteria(include)]
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    pub fn helper() -> u8 {
        0
    }
}

fn main() {
    let descriptor = OrderCriteria::descriptor().unwrap();
    assert!(descriptor.method("get_total").is_some());
    assert!(descriptor.method("clear").is_none());
    assert_eq!(OrderCriteria::helper(), 0);
}
