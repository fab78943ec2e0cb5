//! Compile-fail tests to ensure proper error messages for incorrect usage.
//!
//! These tests verify that the derive macro produces helpful compiler errors
//! when used incorrectly, such as:
//! - Deriving `Depict` for a union
//! - Misspelled or conflicting `#[depict(...)]` options
//! - Field modes on enum variants

#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/compile_fail/*.rs");
}
