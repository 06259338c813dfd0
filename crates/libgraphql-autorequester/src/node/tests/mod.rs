mod field_strategy_tests;
mod lazy_value_tests;
