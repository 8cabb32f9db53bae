mod common;
mod transaction;
