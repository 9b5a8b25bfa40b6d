mod paginated_tests;
