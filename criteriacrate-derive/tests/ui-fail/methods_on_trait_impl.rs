//! `#[criteria_methods]` rejects trait impls

use criteriacrate::criteria_methods;

pub struct Thing;

#[criteria_methods]
impl Default for Thing {
    fn default() -> Self {
        Thing
    }
}

fn main() {}
