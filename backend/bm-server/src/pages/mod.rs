pub mod pages;
pub mod views;
