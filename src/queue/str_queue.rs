use crate::error::QueueError;

use log::{debug, trace};

use std::alloc::Layout;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

type Link = Option<NonNull<Node>>;

struct Node {
    value: String,
    next: Link,
}

impl Node {
    fn alloc(value: String) -> Result<NonNull<Self>, QueueError> {
        let layout = Layout::new::<Node>();
        unsafe {
            let ptr = std::alloc::alloc(layout) as *mut Node;
            if ptr.is_null() {
                debug!("node allocation failed: {:?}", layout);
                return Err(QueueError::AllocationFailure);
            }
            ptr.write(Self { value, next: None });
            Ok(NonNull::new_unchecked(ptr))
        }
    }

    unsafe fn dealloc(ptr: NonNull<Self>) {
        let layout = Layout::new::<Node>();
        std::alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
    }

    // cond: ptr is no longer reachable from any queue
    unsafe fn consume(ptr: NonNull<Self>) -> String {
        let value = std::ptr::read(&ptr.as_ref().value);
        Node::dealloc(ptr);
        value
    }
}

// Copies `s` up to its first NUL into a buffer of exactly that length.
fn copy_value(s: &str) -> Result<String, QueueError> {
    let len = s.find('\0').unwrap_or(s.len());
    let mut value = String::new();
    if value.try_reserve_exact(len).is_err() {
        debug!("value allocation failed: {} bytes", len);
        return Err(QueueError::AllocationFailure);
    }
    value.push_str(&s[..len]);
    Ok(value)
}

// Writes at most `buf.len() - 1` bytes of `value` and NUL-fills the rest.
fn copy_out(value: &str, buf: &mut [u8]) {
    let cap = match buf.len().checked_sub(1) {
        Some(cap) => cap,
        None => return,
    };
    let n = value.len().min(cap);
    buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    buf[n..].fill(0);
}

/// A queue of owned strings on a singly linked list.
///
/// Insertion at either end, removal from the head and `len` are O(1).
/// `reverse` and `sort` relink the existing nodes without copying values.
pub struct StrQueue {
    head: Link,
    tail: Link,
    len: usize,
    // invariant: len == 0 <=> head.is_none() <=> tail.is_none()
}

unsafe impl Send for StrQueue {}
unsafe impl Sync for StrQueue {}

impl StrQueue {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front(&self) -> Option<&str> {
        self.head.map(|ptr| unsafe { (*ptr.as_ptr()).value.as_str() })
    }

    pub fn back(&self) -> Option<&str> {
        self.tail.map(|ptr| unsafe { (*ptr.as_ptr()).value.as_str() })
    }

    /// Inserts a copy of `s` before the current head.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_head(&mut self, s: &str) -> Result<(), QueueError> {
        let mut node = Node::alloc(copy_value(s)?)?;
        unsafe { node.as_mut().next = self.head };
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Appends a copy of `s` after the current tail.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_tail(&mut self, s: &str) -> Result<(), QueueError> {
        let node = Node::alloc(copy_value(s)?)?;
        match self.tail {
            None => self.head = Some(node),
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
        }
        self.tail = Some(node);
        self.len += 1;
        Ok(())
    }

    pub fn pop_head(&mut self) -> Option<String> {
        let head = self.head?;
        unsafe {
            self.head = head.as_ref().next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            Some(Node::consume(head))
        }
    }

    /// Removes the head value, copying it into `out` when given.
    ///
    /// The copy holds at most `out.len() - 1` bytes followed by NUL padding,
    /// so a longer value is truncated. An empty `out` receives nothing.
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<(), QueueError> {
        let value = match self.pop_head() {
            Some(value) => value,
            None => {
                debug!("remove from empty queue");
                return Err(QueueError::EmptyQueue);
            }
        };
        if let Some(buf) = out {
            copy_out(&value, buf);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        let mut ptr = self.head;
        self.head = None;
        self.tail = None;
        self.len = 0;
        while let Some(node) = ptr {
            unsafe {
                ptr = node.as_ref().next;
                drop(Node::consume(node));
            }
        }
    }

    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        trace!("reverse {} values", self.len);

        let mut prev: Link = None;
        let mut ptr = self.head;
        while let Some(mut node) = ptr {
            unsafe {
                ptr = node.as_ref().next;
                node.as_mut().next = prev;
            }
            prev = Some(node);
        }
        self.tail = self.head;
        self.head = prev;
    }

    /// Sorts the values in ascending byte order.
    ///
    /// This is a stable merge sort over the nodes: O(n log n) time and
    /// O(log n) stack, no allocation.
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }
        trace!("sort {} values", self.len);

        let (head, tail) = unsafe { merge_sort(self.head, self.len) };
        self.head = head;
        self.tail = tail;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            ptr: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

// cond: the chain at `head` holds exactly `len` nodes and ends in None
unsafe fn merge_sort(head: Link, len: usize) -> (Link, Link) {
    if len < 2 {
        return (head, head);
    }
    let mid = len / 2;
    let right = split_off(head, mid);
    let left = merge_sort(head, mid);
    let right = merge_sort(right, len - mid);
    merge(left, right)
}

// Cuts the chain after its first `at` nodes and returns the remainder.
unsafe fn split_off(head: Link, at: usize) -> Link {
    let mut ptr = head;
    for _ in 1..at {
        match ptr {
            Some(node) => ptr = node.as_ref().next,
            None => break,
        }
    }
    match ptr {
        Some(mut last) => last.as_mut().next.take(),
        None => None,
    }
}

// cond: both chains are sorted, end in None, and carry their own tails
unsafe fn merge(left: (Link, Link), right: (Link, Link)) -> (Link, Link) {
    let (mut lhs, mut rhs) = (left.0, right.0);
    let mut head: Link = None;
    let mut last: Link = None;

    while let (Some(l), Some(r)) = (lhs, rhs) {
        // ties take from the left to keep the sort stable
        let node = if r.as_ref().value < l.as_ref().value {
            rhs = r.as_ref().next;
            r
        } else {
            lhs = l.as_ref().next;
            l
        };
        match last {
            Some(mut prev) => prev.as_mut().next = Some(node),
            None => head = Some(node),
        }
        last = Some(node);
    }

    let (rest, tail) = if lhs.is_some() {
        (lhs, left.1)
    } else {
        (rhs, right.1)
    };
    match last {
        Some(mut prev) => prev.as_mut().next = rest,
        None => head = rest,
    }
    (head, tail)
}

impl Default for StrQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StrQueue {
    fn drop(&mut self) {
        self.clear()
    }
}

impl fmt::Debug for StrQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ------------------------------------------
// begin: Iter

pub struct Iter<'a> {
    ptr: Link,
    len: usize,
    _marker: PhantomData<&'a StrQueue>,
}

unsafe impl Send for Iter<'_> {}
unsafe impl Sync for Iter<'_> {}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        let node = self.ptr?;
        self.len -= 1;
        unsafe {
            self.ptr = (*node.as_ptr()).next;
            Some((*node.as_ptr()).value.as_str())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a> IntoIterator for &'a StrQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a> FusedIterator for Iter<'a> {}

// end: Iter
// ------------------------------------------
