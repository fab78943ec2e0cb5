//! Test: Enum variants only accept `rename`.

use depict::Depict;

#[derive(Depict)]
enum State {
    #[depict(opaque)]
    Idle,
}

fn main() {}
