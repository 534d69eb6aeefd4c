pub mod broker;
pub mod upstream;
