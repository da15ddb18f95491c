mod common;

mod system_handler_test;
