pub mod capture;
pub mod detection;
pub mod display;
pub mod frame;
pub mod overlay;
pub mod sighting;
