mod session_rng;

pub mod caro;

pub use session_rng::SessionRng;
