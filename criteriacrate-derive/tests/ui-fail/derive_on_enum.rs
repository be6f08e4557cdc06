//! Criteria can only be derived for structs with named fields

use criteriacrate::Criteria;

#[derive(Criteria)]
pub enum Status {
    Open,
    Closed,
}

fn main() {}
