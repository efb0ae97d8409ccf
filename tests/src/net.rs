mod interface_test;
mod util;
