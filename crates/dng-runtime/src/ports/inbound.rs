//! # Driving Ports (API - Inbound)
//!
//! The interface every executable program implements.

use shared_types::Pubkey;

use crate::errors::InstructionError;
use crate::invoke_context::InvokeContext;

/// A program compiled into the runtime.
///
/// The bank looks programs up by id and calls `process` once per
/// instruction, both for top-level instructions and for cross-program
/// invocations. Accounts are reached through `ctx` by their position in the
/// instruction's account list.
///
/// ## Usage
///
/// ```ignore
/// impl BuiltinProgram for MyProgram {
///     fn id(&self) -> Pubkey { MY_ID }
///     fn name(&self) -> &str { "my_program" }
///     fn process(&self, ctx: &mut InvokeContext<'_>, data: &[u8]) -> Result<(), InstructionError> {
///         ctx.log("hello");
///         Ok(())
///     }
/// }
/// ```
pub trait BuiltinProgram: Send + Sync {
    /// Program id the program is deployed at.
    fn id(&self) -> Pubkey;

    /// Human-readable name, used in logs and workspace lookup.
    fn name(&self) -> &str;

    /// Execute one instruction.
    fn process(&self, ctx: &mut InvokeContext<'_>, data: &[u8]) -> Result<(), InstructionError>;
}
