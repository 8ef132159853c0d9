/// Person table CRUD against a live database
pub mod crud_tests;
