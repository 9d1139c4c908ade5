mod array;
mod record;

pub use array::{validate_array_elements, ArrayElements};
pub use record::{validate_object_values, ObjectValues};
