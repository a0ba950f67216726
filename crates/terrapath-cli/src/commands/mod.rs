pub mod compare;
pub mod replay;
