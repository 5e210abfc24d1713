mod str_queue;

pub mod handle;

pub use self::str_queue::{Iter, StrQueue};
