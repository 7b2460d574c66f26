pub mod error_handling_tests;
pub mod reconnect_tests;
