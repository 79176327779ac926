// src/commands/zrank.rs

use crate::commands::helpers::is_keyword;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::format_score;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZRANK key member [WITHSCORE]` and its descending twin `ZREVRANK`.
#[derive(Debug, Clone, Default)]
pub struct Zrank {
    pub key: Bytes,
    pub member: Bytes,
    pub withscore: bool,
    reverse: bool,
}

impl Zrank {
    fn parse_with_direction(
        args: &[Bytes],
        reverse: bool,
        cmd: &str,
    ) -> Result<Self, ZSetError> {
        if args.len() < 2 || args.len() > 3 {
            return Err(ZSetError::WrongArgumentCount(cmd.to_string()));
        }
        let withscore = match args.get(2) {
            Some(flag) if is_keyword(flag, "withscore") => true,
            Some(_) => return Err(ZSetError::SyntaxError),
            None => false,
        };
        Ok(Zrank {
            key: args[0].clone(),
            member: args[1].clone(),
            withscore,
            reverse,
        })
    }
}

impl ParseCommand for Zrank {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        Zrank::parse_with_direction(args, false, "ZRANK")
    }
}

#[async_trait]
impl ExecutableCommand for Zrank {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Null);
        }
        let mut locks = ctx.lock_set();
        locks.read(ctx.cancel, &self.key).await?;
        let set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let rank = if self.reverse {
            set.rev_rank(&self.member)
        } else {
            set.rank(&self.member)
        };
        let Some(rank) = rank else {
            return Ok(RespValue::Null);
        };

        if self.withscore {
            // The member's presence is implied by the rank.
            let score = set.get_score(&self.member).unwrap_or_default();
            Ok(RespValue::Array(vec![
                RespValue::Integer(rank as i64),
                RespValue::BulkString(format_score(score).into()),
            ]))
        } else {
            Ok(RespValue::Integer(rank as i64))
        }
    }
}

/// `ZREVRANK key member [WITHSCORE]`
#[derive(Debug, Clone, Default)]
pub struct ZRevRank {
    pub rank: Zrank,
}

impl ParseCommand for ZRevRank {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        Ok(ZRevRank {
            rank: Zrank::parse_with_direction(args, true, "ZREVRANK")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZRevRank {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        self.rank.execute(ctx).await
    }
}
