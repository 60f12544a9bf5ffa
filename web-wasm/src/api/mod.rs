mod classifier;

pub use classifier::classify_image;
