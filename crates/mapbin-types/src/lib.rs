#![warn(clippy::pedantic)]

pub mod attribute_type;
pub mod node;
pub mod value;

pub use attribute_type::AttributeType;
pub use node::Node;
pub use value::AttributeValue;
