// src/commands/zmpop.rs

use crate::commands::helpers::{is_keyword, parse_positive_count};
use crate::commands::zpop::pop_reply;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext};
use crate::protocol::RespValue;
use crate::storage::PopSide;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZMPOP key [key ...] <MIN | MAX> [COUNT count]`: pops from the first
/// listed key that is a non-empty sorted set.
#[derive(Debug, Clone, Default)]
pub struct ZMPop {
    pub keys: Vec<Bytes>,
    pub count: i64,
    pub side: PopSide,
}

impl ParseCommand for ZMPop {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.is_empty() {
            return Err(ZSetError::WrongArgumentCount("ZMPOP".to_string()));
        }

        // The key list runs to whichever modifier keyword appears first.
        let mut count = 1;
        let mut modifier_idx: Option<usize> = None;

        if let Some(count_idx) = args.iter().position(|arg| is_keyword(arg, "count")) {
            if count_idx < 1 {
                return Err(ZSetError::WrongArgumentCount("ZMPOP".to_string()));
            }
            let raw = args.get(count_idx + 1).ok_or(ZSetError::InvalidCount)?;
            count = parse_positive_count(raw)?;
            modifier_idx = Some(count_idx);
        }

        let side_idx = args
            .iter()
            .position(|arg| is_keyword(arg, "min") || is_keyword(arg, "max"));
        let Some(side_idx) = side_idx else {
            return Err(ZSetError::SyntaxError);
        };
        if side_idx < 1 {
            return Err(ZSetError::WrongArgumentCount("ZMPOP".to_string()));
        }
        let side = if is_keyword(&args[side_idx], "min") {
            PopSide::Min
        } else {
            PopSide::Max
        };
        let boundary = modifier_idx.map_or(side_idx, |idx| idx.min(side_idx));

        Ok(ZMPop {
            keys: args[..boundary].to_vec(),
            count,
            side,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZMPop {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();

        for key in &self.keys {
            if !ctx.host.key_exists(key) {
                continue;
            }
            locks.write(ctx.cancel, key).await?;
            let mut set = match ctx.host.get_value(key) {
                Some(DataValue::SortedSet(set)) if !set.is_empty() => set,
                // Wrong type and empty sets are skipped, not errors.
                _ => {
                    locks.release(key);
                    continue;
                }
            };

            let popped = set.pop(self.count, self.side)?;
            ctx.host.set_value(key, DataValue::SortedSet(set))?;
            return Ok(pop_reply(&popped));
        }

        Ok(RespValue::legacy_nil())
    }
}
