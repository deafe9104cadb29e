//! # Error 模块
//!
//! 定义 dialog-runtime 中使用的错误类型。
//!
//! 配置错误是创作期内容缺陷，构造时快速失败；运行期没有可恢复的
//! 错误分类，Runtime 的驱动函数不返回 Result。

use thiserror::Error;

use crate::settings::SettingsError;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 台词引用的说话者索引越界
    #[error("第 {line} 条台词：说话者索引 {speaker} 越界（共 {speaker_count} 个说话者）")]
    SpeakerOutOfRange {
        line: usize,
        speaker: usize,
        speaker_count: usize,
    },
}

/// dialog-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialogError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 设置存取错误
    #[error("设置存取错误: {0}")]
    Settings(#[from] SettingsError),
}

/// Result 类型别名
pub type DialogResult<T> = Result<T, DialogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::SpeakerOutOfRange {
            line: 3,
            speaker: 5,
            speaker_count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("3"));
        assert!(msg.contains("5"));
    }

    #[test]
    fn test_error_conversion() {
        let err: DialogError = ConfigError::SpeakerOutOfRange {
            line: 0,
            speaker: 1,
            speaker_count: 1,
        }
        .into();
        assert!(matches!(err, DialogError::Config(_)));
    }
}
