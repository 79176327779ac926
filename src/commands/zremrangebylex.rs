// src/commands/zremrangebylex.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::storage::{LexBound, LexRange};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZREMRANGEBYLEX key min max`: removes members in a byte-lexicographic
/// range. Only meaningful when every member shares one score; a mixed-score
/// set answers with the null sentinel rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ZRemRangeByLex {
    pub key: Bytes,
    pub range: LexRange,
}

impl ParseCommand for ZRemRangeByLex {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 3 {
            return Err(ZSetError::WrongArgumentCount("ZREMRANGEBYLEX".to_string()));
        }
        Ok(ZRemRangeByLex {
            key: args[0].clone(),
            range: LexRange {
                min: LexBound::parse(&args[1])?,
                max: LexBound::parse(&args[2])?,
            },
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZRemRangeByLex {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Null);
        }
        let mut locks = ctx.lock_set();
        locks.write(ctx.cancel, &self.key).await?;
        let mut set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        if set.is_empty() {
            return Ok(RespValue::Integer(0));
        }
        if !set.scores_all_equal() {
            return Ok(RespValue::Null);
        }

        let removed = set.remove_lex_range(&self.range);
        ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
        Ok(RespValue::Integer(removed as i64))
    }
}
