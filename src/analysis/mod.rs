pub mod tokenizer;
pub mod template;
pub mod concepts;
pub mod matcher;
pub mod reflection;
pub mod trends;
pub mod unlock;

pub use tokenizer::*;
pub use template::*;
pub use concepts::*;
pub use matcher::*;
pub use reflection::*;
pub use trends::*;
pub use unlock::*;

#[cfg(test)]
mod tests;
