/// Module containing particle swarm optimization algorithms.
pub mod particles;
