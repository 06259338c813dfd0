mod algebra_tests;
mod canonicalize_tests;
mod selection_set_tests;
