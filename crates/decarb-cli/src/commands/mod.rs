pub mod optimize;
pub mod parse;
pub mod scenario;
