mod criteria;

pub use criteria::*;
