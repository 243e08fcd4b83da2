pub mod jobmodel;
pub mod profilemodel;
