// src/commands/zmscore.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::format_score;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZMSCORE key member [member ...]`: one score per requested member, with
/// the legacy nil standing in for members that are not in the set.
#[derive(Debug, Clone, Default)]
pub struct ZMScore {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl ParseCommand for ZMScore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() < 2 {
            return Err(ZSetError::WrongArgumentCount("ZMSCORE".to_string()));
        }
        Ok(ZMScore {
            key: args[0].clone(),
            members: args[1..].to_vec(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZMScore {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Array(Vec::new()));
        }
        let mut locks = ctx.lock_set();
        locks.read(ctx.cancel, &self.key).await?;
        let set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let scores = self
            .members
            .iter()
            .map(|member| match set.get_score(member) {
                Some(score) => RespValue::SimpleString(format_score(score)),
                None => RespValue::legacy_nil(),
            })
            .collect();
        Ok(RespValue::Array(scores))
    }
}
