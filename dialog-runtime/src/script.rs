//! # Script 模块
//!
//! 对话脚本的数据模型。
//!
//! 脚本是创作期数据：台词一经写好不再变化，插入顺序即播放顺序。
//! 构造时校验所有说话者索引，越界是内容缺陷，直接返回错误。

use serde::{Deserialize, Serialize};

use crate::command::SpeakerId;
use crate::error::ConfigError;

/// 一条台词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogLine {
    /// 说话者索引（指向所属 Sequencer 的说话者数组）
    pub speaker: SpeakerId,
    /// 说话时显示的名字
    pub name: String,
    /// 台词内容
    pub text: String,
}

impl DialogLine {
    /// 创建一条台词
    pub fn new(speaker: SpeakerId, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker,
            name: name.into(),
            text: text.into(),
        }
    }
}

/// 一个 Sequencer 的完整脚本
///
/// 包含参与对话的说话者数量和按播放顺序排列的台词。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogScript {
    /// 参与对话的说话者数量
    speaker_count: usize,
    /// 台词列表，插入顺序即播放顺序
    lines: Vec<DialogLine>,
}

impl DialogScript {
    /// 创建脚本并校验说话者索引
    pub fn new(speaker_count: usize, lines: Vec<DialogLine>) -> Result<Self, ConfigError> {
        for (index, line) in lines.iter().enumerate() {
            if line.speaker >= speaker_count {
                return Err(ConfigError::SpeakerOutOfRange {
                    line: index,
                    speaker: line.speaker,
                    speaker_count,
                });
            }
        }

        Ok(Self {
            speaker_count,
            lines,
        })
    }

    /// 说话者数量
    pub fn speaker_count(&self) -> usize {
        self.speaker_count
    }

    /// 台词数量
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 是否没有任何台词
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 获取指定位置的台词
    pub fn get(&self, index: usize) -> Option<&DialogLine> {
        self.lines.get(index)
    }
}
