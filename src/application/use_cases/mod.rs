mod negotiate;

pub use negotiate::*;
