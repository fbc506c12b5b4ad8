pub mod attractor;
