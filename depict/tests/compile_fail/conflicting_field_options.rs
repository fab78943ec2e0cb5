//! Test: `skip` cannot be combined with a rename, and `display` cannot be
//! combined with `opaque`.

use depict::Depict;

#[derive(Depict)]
struct Skipped {
    #[depict(skip, rename = "x")]
    value: u32,
}

#[derive(Depict)]
struct Rendered {
    #[depict(display, opaque)]
    value: u32,
}

fn main() {}
