pub mod info;
pub mod plan;
pub mod split;
