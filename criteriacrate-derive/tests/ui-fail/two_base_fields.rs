//! Only one base field is allowed

use criteriacrate::Criteria;
use criteriacrate::filter::StringFilter;

#[derive(Default, Criteria)]
pub struct Common {
    pub name: Option<StringFilter>,
}

#[derive(Criteria)]
pub struct Both {
    #[criteria(base)]
    pub first: Common,
    #[criteria(base)]
    pub second: Common,
}

fn main() {}
