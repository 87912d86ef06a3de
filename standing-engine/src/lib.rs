//! Standing Engine - 餐厅平台顾客与员工等级引擎
//!
//! # 架构概述
//!
//! Tracks customer standing (visitor / registered / VIP, warnings,
//! blacklist) and employee standing (pay, demotions, bonuses), and applies
//! the transitions triggered by orders, ratings, complaints and delivery
//! bids.
//!
//! - **存储** (`storage`): redb record tables, one write transaction per operation
//! - **规则** (`rules`): pure transition rules over a single record
//! - **引擎** (`engine`): operations, validation, event broadcast
//!
//! # 模块结构
//!
//! ```text
//! standing-engine/src/
//! ├── core/          # 配置
//! ├── engine/        # StandingEngine 操作与事件
//! ├── rules/         # 升级、警告、绩效、投诉权重、竞价
//! ├── storage.rs     # redb 存储
//! ├── money.rs       # 金额计算 (rust_decimal)
//! └── utils/         # 日志、输入校验
//! ```

pub mod core;
pub mod engine;
pub mod money;
pub mod rules;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, StandingConfig};
pub use engine::{EngineError, EngineResult, ErrorKind, StandingEngine, StandingEvent};
pub use storage::{StandingStorage, StorageError};

// Re-export logger functions
pub use utils::logger::{init_from_config, init_logger, init_logger_with_file};
