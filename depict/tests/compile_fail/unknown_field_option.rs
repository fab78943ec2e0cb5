//! Test: An unknown field option should fail with the list of valid options.

use depict::Depict;

#[derive(Depict)]
struct Account {
    id: u32,
    // ERROR: `secret` is not a field option
    #[depict(secret)]
    password: String,
}

fn main() {}
