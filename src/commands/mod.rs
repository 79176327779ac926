// src/commands/mod.rs

//! Command dispatch and the per-command handler modules.

pub mod helpers;
pub mod module;
pub mod registry;
pub mod unimplemented;
pub mod zadd;
pub mod zcard;
pub mod zcount;
pub mod zdiff;
pub mod zdiffstore;
pub mod zincrby;
pub mod zinter;
pub mod zinterstore;
pub mod zmpop;
pub mod zmscore;
pub mod zpop;
pub mod zrank;
pub mod zrem;
pub mod zremrangebylex;
pub mod zremrangebyrank;
pub mod zremrangebyscore;
pub mod zscore;
pub mod zunion;
pub mod zunionstore;

use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, KeyspaceHost};
use crate::protocol::RespValue;
use async_trait::async_trait;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A trait for parsing a command's arguments (everything after the command
/// name) into the command's struct.
pub trait ParseCommand: Sized {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError>;
}

/// The execution logic of a command. Implementations follow one skeleton:
/// parse has already happened; acquire locks, compute, write back, reply.
#[async_trait]
pub trait ExecutableCommand {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError>;
}

/// Entry point for the external command router.
///
/// `args` is the full argument vector including the command name at index 0.
/// Returns the serialized response bytes; errors are returned unserialized
/// for the router to render.
pub async fn dispatch(
    host: &dyn KeyspaceHost,
    cancel: &CancellationToken,
    args: &[Bytes],
) -> Result<Vec<u8>, ZSetError> {
    let name_arg = args
        .first()
        .ok_or_else(|| ZSetError::WrongArgumentCount(String::new()))?;
    let name = helpers::extract_string(name_arg)?.to_ascii_lowercase();
    debug!(command = %name, arity = args.len(), "dispatching sorted set command");

    let ctx = ExecutionContext::new(host, cancel);
    let rest = &args[1..];

    let reply = match name.as_str() {
        "zadd" => zadd::Zadd::parse(rest)?.execute(&ctx).await?,
        "zcard" => zcard::Zcard::parse(rest)?.execute(&ctx).await?,
        "zcount" => zcount::Zcount::parse(rest)?.execute(&ctx).await?,
        "zdiff" => zdiff::Zdiff::parse(rest)?.execute(&ctx).await?,
        "zdiffstore" => zdiffstore::ZDiffStore::parse(rest)?.execute(&ctx).await?,
        "zincrby" => zincrby::ZIncrBy::parse(rest)?.execute(&ctx).await?,
        "zinter" => zinter::Zinter::parse(rest)?.execute(&ctx).await?,
        "zinterstore" => zinterstore::ZInterStore::parse(rest)?.execute(&ctx).await?,
        "zmpop" => zmpop::ZMPop::parse(rest)?.execute(&ctx).await?,
        "zmscore" => zmscore::ZMScore::parse(rest)?.execute(&ctx).await?,
        "zpopmax" => zpop::ZPopMax::parse(rest)?.execute(&ctx).await?,
        "zpopmin" => zpop::ZPopMin::parse(rest)?.execute(&ctx).await?,
        "zrank" => zrank::Zrank::parse(rest)?.execute(&ctx).await?,
        "zrevrank" => zrank::ZRevRank::parse(rest)?.execute(&ctx).await?,
        "zrem" => zrem::Zrem::parse(rest)?.execute(&ctx).await?,
        "zremrangebylex" => {
            zremrangebylex::ZRemRangeByLex::parse(rest)?
                .execute(&ctx)
                .await?
        }
        "zremrangebyrank" => {
            zremrangebyrank::ZRemRangeByRank::parse(rest)?
                .execute(&ctx)
                .await?
        }
        "zremrangebyscore" => {
            zremrangebyscore::ZRemRangeByScore::parse(rest)?
                .execute(&ctx)
                .await?
        }
        "zscore" => zscore::Zscore::parse(rest)?.execute(&ctx).await?,
        "zunion" => zunion::Zunion::parse(rest)?.execute(&ctx).await?,
        "zunionstore" => zunionstore::ZUnionStore::parse(rest)?.execute(&ctx).await?,
        "zrange" => unimplemented::zrange(&ctx, rest).await?,
        "zrangestore" => unimplemented::zrangestore(&ctx, rest).await?,
        "zrandmember" => unimplemented::zrandmember(&ctx, rest).await?,
        "zrangebylex" => unimplemented::zrangebylex(&ctx, rest).await?,
        "zrangebyscore" => unimplemented::zrangebyscore(&ctx, rest).await?,
        "zlexcount" => unimplemented::zlexcount(&ctx, rest).await?,
        _ => return Err(ZSetError::UnknownCommand(name)),
    };

    Ok(reply.into_response_bytes())
}
