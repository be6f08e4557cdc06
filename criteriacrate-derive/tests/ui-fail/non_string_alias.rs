//! Aliases must be string literals

use criteriacrate::Criteria;

#[derive(Criteria)]
pub struct Bad {
    #[criteria(alias = 42)]
    pub value: u32,
}

fn main() {}
