pub mod company;

pub use company::{Company, NewCompany};
