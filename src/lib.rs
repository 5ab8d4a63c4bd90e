pub mod ppm;
pub mod raytracer;
