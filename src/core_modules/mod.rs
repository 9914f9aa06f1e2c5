pub mod anchor_store;
pub mod classifier;
pub mod color;
pub mod frame;
pub mod geometry;
pub mod latest_cell;
pub mod one_shot;
pub mod quantizer;
pub mod raycast;
pub mod utils;
