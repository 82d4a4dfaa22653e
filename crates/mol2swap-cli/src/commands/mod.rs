pub mod inspect;
pub mod substitute;
