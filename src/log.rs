//! The log sink (C9): destination for `Log` operator output, owned by
//! the evaluator rather than global/static state.

/// Receives one line per `Log` invocation.
pub trait LogSink {
    fn log(&mut self, line: &str);
}

/// Default sink. Writes straight to standard error, one line per call —
/// carrying forward the teacher's own choice to reach for `eprintln!`
/// for operational output rather than a tracing crate it never
/// depended on.
pub struct StderrSink;

impl LogSink for StderrSink {
    fn log(&mut self, line: &str) {
        eprintln!("{line}");
    }
}
