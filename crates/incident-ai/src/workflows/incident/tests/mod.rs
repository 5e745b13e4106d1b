mod analyzer;
mod common;
mod questions;
