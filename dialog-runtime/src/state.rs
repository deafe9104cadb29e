//! # State 模块
//!
//! 定义 Sequencer 的运行时状态和每 tick 的输出。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**
//! - 所有状态必须**可序列化**
//! - 不允许隐式全局状态

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::command::{Command, SpeakerId};

/// 打字动画进度
///
/// 打字不是协程，而是由外部时钟（`tick` 的 `dt`）驱动的状态机。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingState {
    /// 已显示的字符数（Unicode 标量，不是字节）
    pub revealed: usize,
    /// 自上一个字符显示以来累计的时间
    pub elapsed: Duration,
}

impl TypingState {
    /// 从第 0 个字符开始
    pub fn start() -> Self {
        Self {
            revealed: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Sequencer 运行时状态
///
/// 由所属 Sequencer 独占，只在单个调度线程上访问，每次运行时重置。
///
/// # 不变式
///
/// `current_line` 在一次运行内单调不减，`None` 表示还没有播放第一条台词。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    /// 是否已经历激活 tick
    pub started: bool,

    /// 当前台词索引
    pub current_line: Option<usize>,

    /// 当前说话者
    pub current_speaker: SpeakerId,

    /// 进行中的打字动画（`None` 表示没有）
    pub typing: Option<TypingState>,
}

/// 单次 tick 的结果
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// 本次 tick 产生的所有指令
    pub commands: Vec<Command>,
    /// 是否已播放完毕
    pub finished: bool,
}

impl TickOutput {
    /// 创建未完成的结果
    pub(crate) fn running(commands: Vec<Command>) -> Self {
        Self {
            commands,
            finished: false,
        }
    }

    /// 创建已完成的结果
    pub(crate) fn finished(commands: Vec<Command>) -> Self {
        Self {
            commands,
            finished: true,
        }
    }
}
