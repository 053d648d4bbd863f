pub mod effects;
pub mod sequences;
pub mod static_data;
