#![doc = include_str!("../README.md")]

pub use xb_codec as codec;
pub use xb_reflect as reflect;
