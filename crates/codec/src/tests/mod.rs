mod derive_tests;
