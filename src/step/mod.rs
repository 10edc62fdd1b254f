//! Step identity model.
//!
//! - [`StepIdentity`] - the expected shape of one step execution
//! - [`StepParams`] - ordered `with:`/`env:` parameters
//! - [`MockLine`] - the line a mocked step prints, and its decoding
//! - [`ExecutionTrace`] / [`TraceStep`] - what an engine reports back

pub mod identity;
pub mod line;
pub mod params;
pub mod trace;

pub use identity::{StepIdentity, STATUS_FAILURE, STATUS_SUCCESS};
pub use line::{MockLine, MOCK_MARKER};
pub use params::{StepParam, StepParams};
pub use trace::{ExecutionTrace, TraceStep};
