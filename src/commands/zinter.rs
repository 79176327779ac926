// src/commands/zinter.rs

use crate::commands::helpers::{members_reply, parse_keys_weights_aggregate};
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::storage::{Aggregate, SortedSet, intersect};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZINTER key [key ...] [WEIGHTS w ...] [AGGREGATE <SUM|MIN|MAX>]
/// [WITHSCORES]`
#[derive(Debug, Clone, Default)]
pub struct Zinter {
    pub keys: Vec<Bytes>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
    pub withscores: bool,
}

impl ParseCommand for Zinter {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.is_empty() {
            return Err(ZSetError::WrongArgumentCount("ZINTER".to_string()));
        }
        let parsed = parse_keys_weights_aggregate(args, "ZINTER")?;
        Ok(Zinter {
            keys: parsed.keys,
            weights: parsed.weights,
            aggregate: parsed.aggregate,
            withscores: parsed.withscores,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zinter {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        let (sets, weights) =
            collect_weighted_sets(ctx, &mut locks, &self.keys, &self.weights).await?;

        let result = match sets.as_slice() {
            [] => {
                return Err(ZSetError::EmptyInput("not enough sets to form an intersect"));
            }
            [single] => single.clone(),
            _ => intersect(&sets, &weights, self.aggregate),
        };
        Ok(members_reply(&result, self.withscores))
    }
}

/// Read-locks every existing key and returns its set together with the
/// weight belonging to that key. Weights stay aligned with their keys when
/// missing keys are dropped.
pub(super) async fn collect_weighted_sets(
    ctx: &ExecutionContext<'_>,
    locks: &mut crate::keyspace::LockSet<'_>,
    keys: &[Bytes],
    weights: &[f64],
) -> Result<(Vec<SortedSet>, Vec<f64>), ZSetError> {
    let mut sets = Vec::with_capacity(keys.len());
    let mut kept_weights = Vec::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        if !ctx.host.key_exists(key) {
            continue;
        }
        locks.read(ctx.cancel, key).await?;
        sets.push(as_sorted_set(ctx.host.get_value(key), key)?);
        kept_weights.push(weights.get(i).copied().unwrap_or(1.0));
    }
    Ok((sets, kept_weights))
}
