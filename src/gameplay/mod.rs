pub mod elimination;
pub mod routing;
pub mod scoring;
pub mod spawn;
