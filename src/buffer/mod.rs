//! Buffer types.
//!
//! - [`ByteBuffer`] - Fixed-capacity bytes with position/limit markers
//! - [`DirectRegion`] - Page-aligned off-heap storage behind direct buffers

mod byte_buffer;
mod direct;

pub use byte_buffer::ByteBuffer;
pub use direct::DirectRegion;

pub(crate) use direct::page_size;
