//! Command modules for the regconf CLI.
//!
//! Each submodule handles one subcommand:
//!
//! - `merge_cmd`: merge `common` with one registry override
//! - `registry_name_cmd`: derive a registry's short name from its upstream URL
//! - `list_cmd`: list registry names
//! - `build_cmd`: assemble a configuration file from split files
//! - `render_cmd`: render a deployment file from a template
//! - `validate_cmd`: check a configuration file's shape

pub mod build_cmd;
pub mod list_cmd;
pub mod merge_cmd;
pub mod registry_name_cmd;
pub mod render_cmd;
pub mod validate_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Result of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command did its work.
    Success,

    /// `registry-name` found no URL to derive a name from. Nothing was
    /// printed.
    NoDerivableName,
}

impl CommandOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::NoDerivableName => 1,
        }
    }
}

/// Process exit code used for every error.
pub const ERROR_EXIT_CODE: i32 = 2;
