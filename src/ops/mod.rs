pub mod sync;
pub mod view_ops;
