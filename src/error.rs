use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue handle is missing")]
    InvalidHandle,

    #[error("failed to allocate a queue node or its value")]
    AllocationFailure,

    #[error("queue is empty")]
    EmptyQueue,
}
