//! VISTAS module - Flat channel registry of a simulated network.
//!
//! A document is a `Network` root of `VirtualComponent` elements whose
//! children are channel declarations. Channels are shared between components
//! by name and get a multicast endpoint when their document is parsed.

mod allocator;
mod channel;
mod network;


pub use allocator::*;
pub use channel::*;
pub use network::*;
