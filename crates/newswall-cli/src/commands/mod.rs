pub mod fetch;
pub mod outlets;
pub mod run;
