pub mod catalog;
pub mod matching;
pub mod portfolio;
pub mod resume;
