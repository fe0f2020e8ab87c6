//! # `fibscope-core` - 领域核心
//!
//! 定义行情实体、指标列标识、各领域错误以及数据源端口 (Port)。
//! 本 crate 不包含任何 I/O 实现，具体数据源由 `fibscope-feed` 提供。

pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod indicator {
    pub mod entity;
    pub mod error;
}
