mod row_major_tests;
