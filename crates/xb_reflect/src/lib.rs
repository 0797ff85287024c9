#![doc = include_str!("../README.md")]

mod describe;
mod impls;
mod object;
mod registry;
mod scalar;
mod value;

pub mod ops;

pub use object::{ExtraData, Lifecycle, Object, PropertySpec, Tagged};
pub use registry::TypeRegistry;
pub use scalar::{Scalar, ScalarError};
pub use value::{GraphValue, ValueKind, ValueMut, ValueRef};
