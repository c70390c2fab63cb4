mod normalizer_tests;
