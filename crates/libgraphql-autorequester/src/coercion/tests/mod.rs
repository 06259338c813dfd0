mod coerce_arguments_tests;
