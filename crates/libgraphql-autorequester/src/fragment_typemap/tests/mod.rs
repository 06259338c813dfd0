mod fragment_type_map_builder_tests;
