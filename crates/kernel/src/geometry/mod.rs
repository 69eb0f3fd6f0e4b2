pub mod entity;
pub mod line;
pub mod plane;
pub mod point;
pub mod vector;
