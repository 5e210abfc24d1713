//! Free functions over a queue handle that may be missing.
//!
//! A missing handle is `None`. Mutators then fail without side effects and
//! `size` reports zero. Every failure is logged at debug level and reported
//! as `false`.

use crate::error::QueueError;
use crate::queue::StrQueue;

use log::debug;

use std::alloc::Layout;

/// Allocates an empty queue, or returns `None` if allocation fails.
pub fn new() -> Option<Box<StrQueue>> {
    let layout = Layout::new::<StrQueue>();
    unsafe {
        let ptr = std::alloc::alloc(layout) as *mut StrQueue;
        if ptr.is_null() {
            debug!("queue allocation failed: {:?}", layout);
            return None;
        }
        ptr.write(StrQueue::new());
        Some(Box::from_raw(ptr))
    }
}

/// Releases the queue, every node and every value.
pub fn destroy(q: Option<Box<StrQueue>>) {
    drop(q)
}

fn report(result: Result<(), QueueError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!("queue operation failed: {}", err);
            false
        }
    }
}

pub fn insert_head(q: Option<&mut StrQueue>, s: &str) -> bool {
    report(q.ok_or(QueueError::InvalidHandle).and_then(|q| q.insert_head(s)))
}

pub fn insert_tail(q: Option<&mut StrQueue>, s: &str) -> bool {
    report(q.ok_or(QueueError::InvalidHandle).and_then(|q| q.insert_tail(s)))
}

/// Removes the head value. When `out` is given it receives at most
/// `out.len() - 1` bytes of the value and a terminating NUL.
pub fn remove_head(q: Option<&mut StrQueue>, out: Option<&mut [u8]>) -> bool {
    report(q.ok_or(QueueError::InvalidHandle).and_then(|q| q.remove_head(out)))
}

pub fn size(q: Option<&StrQueue>) -> usize {
    q.map_or(0, StrQueue::len)
}

pub fn reverse(q: Option<&mut StrQueue>) {
    if let Some(q) = q {
        q.reverse()
    }
}

pub fn sort(q: Option<&mut StrQueue>) {
    if let Some(q) = q {
        q.sort()
    }
}
