//! Operation traits for the collection shapes, plus the concrete containers
//! (`Stack`, `Queue`, `MultiArray`, `Poly`) that have no std equivalent with
//! the semantics the codec needs.

mod mapping;
mod option;
mod pair;
mod poly;
mod queue;
mod sequence;
mod stack;
mod tensor;

pub use mapping::{EntryError, Mapping};
pub use option::OptionSlot;
pub use pair::Pair;
pub use poly::Poly;
pub use queue::{Fifo, Queue};
pub use sequence::Sequence;
pub use stack::{Lifo, Stack};
pub use tensor::{MultiArray, Odometer, ShapeError, Tensor};
