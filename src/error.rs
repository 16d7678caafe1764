/// Lexical and syntax diagnostics.
///
/// Defines the positioned diagnostics produced while tokenizing and building
/// statements, together with the ordered collector the phases write into and
/// the orchestrating caller reads between phases.
pub mod diagnostic;
/// Runtime errors.
///
/// Contains the errors raised while evaluating a statement. Each one cancels
/// the statement in progress and is reported on the output channel; only a
/// failing output sink aborts the whole run.
pub mod runtime_error;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Position};
pub use runtime_error::RuntimeError;
