pub mod planning;
pub mod util;
pub mod validation;
