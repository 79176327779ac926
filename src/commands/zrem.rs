// src/commands/zrem.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZREM key member [member ...]`
#[derive(Debug, Clone, Default)]
pub struct Zrem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl ParseCommand for Zrem {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() < 2 {
            return Err(ZSetError::WrongArgumentCount("ZREM".to_string()));
        }
        Ok(Zrem {
            key: args[0].clone(),
            members: args[1..].to_vec(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zrem {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Integer(0));
        }
        let mut locks = ctx.lock_set();
        locks.write(ctx.cancel, &self.key).await?;
        let mut set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let mut removed = 0;
        for member in &self.members {
            if set.remove(member) {
                removed += 1;
            }
        }
        ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
        Ok(RespValue::Integer(removed))
    }
}
