pub mod forecast;
pub mod incident;
pub mod series;

pub use forecast::*;
pub use incident::*;
pub use series::*;
