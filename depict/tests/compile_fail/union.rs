//! Test: Deriving `Depict` for a union should fail.
//!
//! Only one union field is valid at a time, so there is nothing safe to walk.

use depict::Depict;

#[derive(Depict)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
