pub mod score;
pub mod sg;
