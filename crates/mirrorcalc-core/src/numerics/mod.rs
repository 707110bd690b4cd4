pub mod grid;
pub mod quadrature;

pub use grid::{GridError, linear_grid};
pub use quadrature::{CompositeSimpson, QuadratureError, QuadratureRule};
