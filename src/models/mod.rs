// Model module exports

pub mod block;
pub mod grid;
pub mod payload;
pub mod template;
