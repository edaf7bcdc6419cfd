//! Whole-program translation
//!
//! The vertex and fragment stages of a program share no state, so they are
//! translated on two scoped worker threads.

use gc_core::{CrossError, Result};

use crate::stage::ShaderStage;
use crate::translator::Translator;

/// Translated sources of a vertex/fragment pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutput {
    pub vertex: String,
    pub fragment: String,
}

impl Translator {
    /// Translate both stages of a program concurrently.
    ///
    /// Fails with the vertex error first if both stages are rejected.
    pub fn translate_program(&self, vertex: &str, fragment: &str) -> Result<ProgramOutput> {
        let (vertex_result, fragment_result) = crossbeam::thread::scope(|scope| {
            let vertex_job = scope.spawn(|_| self.translate(vertex, ShaderStage::Vertex));
            let fragment_job = scope.spawn(|_| self.translate(fragment, ShaderStage::Fragment));
            (vertex_job.join(), fragment_job.join())
        })
        .map_err(|_| CrossError::WorkerPanicked("program"))?;

        let vertex = vertex_result.map_err(|_| CrossError::WorkerPanicked("vertex shader"))??;
        let fragment =
            fragment_result.map_err(|_| CrossError::WorkerPanicked("fragment shader"))??;

        tracing::debug!(
            "Translated program: vertex {} bytes, fragment {} bytes",
            vertex.len(),
            fragment.len()
        );
        Ok(ProgramOutput { vertex, fragment })
    }
}
