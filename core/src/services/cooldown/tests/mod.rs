mod ticker_tests;
mod timer_tests;
