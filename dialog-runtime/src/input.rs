//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - `RuntimeInput` 是 Host 采集用户操作后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理鼠标/键盘事件，只处理语义化的输入
//! - `Advance` 是离散的边沿事件（"本 tick 是否刚触发了推进操作"），
//!   不是按住状态；每 tick 至多消费一个

use serde::{Deserialize, Serialize};

/// 信号标识符
///
/// 用于 Host 向 Runtime 通知异步事件（如场景加载完成）。
pub type SignalId = String;

/// Host 向 Runtime 传递的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeInput {
    /// 推进对话（点击等离散触发）
    Advance,

    /// 外部信号
    Signal { id: SignalId },
}

impl RuntimeInput {
    /// 创建推进输入
    pub fn advance() -> Self {
        Self::Advance
    }

    /// 创建信号输入
    pub fn signal(id: impl Into<SignalId>) -> Self {
        Self::Signal { id: id.into() }
    }
}
