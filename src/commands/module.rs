// src/commands/module.rs

//! The registration surface the host plugs this module in through.

use crate::commands::dispatch;
use crate::commands::registry::{self, CommandDescriptor};
use crate::errors::ZSetError;
use crate::keyspace::KeyspaceHost;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// The sorted set command module as the host sees it: a name, a
/// description, the command descriptor table, and one dispatch entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedSetModule;

impl SortedSetModule {
    pub fn new() -> Self {
        SortedSetModule
    }

    pub fn name(&self) -> &'static str {
        "sorted-set"
    }

    pub fn description(&self) -> &'static str {
        "Handles commands on the sorted set data type"
    }

    pub fn commands(&self) -> &'static [CommandDescriptor] {
        registry::COMMANDS
    }

    /// Routes one command invocation. `args` is the full argument vector
    /// including the command name.
    pub async fn handle_command(
        &self,
        host: &dyn KeyspaceHost,
        cancel: &CancellationToken,
        args: &[Bytes],
    ) -> Result<Vec<u8>, ZSetError> {
        dispatch(host, cancel, args).await
    }
}
