//! labsim - interactive physics and calculus demonstrations
//!
//! Configuration loading, the [`Lab`](lab::Lab) container with one instance of
//! each demonstration, and the frame system that drives them.

pub mod config;
pub mod lab;
pub mod systems;
