pub mod cursor;
pub mod interpreter;
pub mod scope;
pub mod value;
