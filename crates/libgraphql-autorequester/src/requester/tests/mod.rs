mod batching_tests;
