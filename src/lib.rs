//! A string queue backed by a singly linked list.

pub mod error;
pub mod queue;

pub use crate::error::QueueError;
pub use crate::queue::{handle, Iter, StrQueue};
