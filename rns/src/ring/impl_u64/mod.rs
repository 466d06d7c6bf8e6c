pub mod ring;
pub mod ring_rns;
pub mod sampling;
