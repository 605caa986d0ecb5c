pub mod fragment;
pub mod report;
