mod common;
mod convex_shape;
mod decomposition;
