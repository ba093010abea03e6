pub mod base;
pub mod graph;
pub mod social;
