//! Frame compositing and the render job state machine.

pub(crate) mod frame;
pub(crate) mod pipeline;
pub(crate) mod plan;
