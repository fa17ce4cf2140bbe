mod history_tests;
mod view_tests;
