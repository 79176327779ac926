// src/commands/unimplemented.rs

//! Handlers for the registered commands this module intentionally does not
//! implement: range-by-index retrieval, random member sampling, and the
//! lexicographic range reads.

use crate::errors::ZSetError;
use crate::keyspace::ExecutionContext;
use crate::protocol::RespValue;
use bytes::Bytes;

pub async fn zrange(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZRANGE"))
}

pub async fn zrangestore(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZRANGESTORE"))
}

pub async fn zrandmember(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZRANDMEMBER"))
}

pub async fn zrangebylex(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZRANGEBYLEX"))
}

pub async fn zrangebyscore(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZRANGEBYSCORE"))
}

pub async fn zlexcount(
    _ctx: &ExecutionContext<'_>,
    _args: &[Bytes],
) -> Result<RespValue, ZSetError> {
    Err(ZSetError::NotImplemented("ZLEXCOUNT"))
}
