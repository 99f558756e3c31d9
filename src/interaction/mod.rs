pub mod buckets;
pub mod drag;
pub mod pointer;
pub mod session;
