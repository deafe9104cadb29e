//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有指令。
//! Command 是 Runtime 向 Host 输出的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染引擎的类型

use serde::{Deserialize, Serialize};

/// 说话者标识符
///
/// 对应 Sequencer 配置中说话者数组的索引。
pub type SpeakerId = usize;

/// Runtime 向 Host 发出的指令
///
/// Host 接收 Command 后，将其转换为实际的 UI、场景、灯光等操作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 显示某个说话者的对话 UI（对话框、名字、正文）
    ShowSpeakerChrome { speaker: SpeakerId },

    /// 隐藏某个说话者的对话 UI
    HideSpeakerChrome { speaker: SpeakerId },

    /// 设置说话者名字文本
    SetSpeakerName { speaker: SpeakerId, name: String },

    /// 设置对话正文
    ///
    /// 打字动画进行中为部分文本，完成后为全文。
    SetDialogueText { speaker: SpeakerId, text: String },

    /// 设置"本句完成"指示箭头的可见性
    SetArrowVisible { speaker: SpeakerId, visible: bool },

    /// 设置立绘的可见性
    SetPortraitVisible { speaker: SpeakerId, visible: bool },

    /// 设置立绘是否压暗（非当前说话者压暗显示）
    SetPortraitDimmed { speaker: SpeakerId, dimmed: bool },

    /// 显示整个对话面板
    ShowDialogPanel,

    /// 隐藏整个对话面板
    HideDialogPanel,

    /// 显示状态栏文本（结束语等）
    ShowStatusText { text: String },

    /// 隐藏状态栏文本
    HideStatusText,

    /// 设置全屏遮罩透明度（0.0 = 透明，1.0 = 全黑）
    SetFadeAlpha { alpha: f32 },

    /// 请求异步加载场景
    ///
    /// Host 加载完成后应发送 [`SCENE_LOADED_SIGNAL`] 信号。
    ///
    /// [`SCENE_LOADED_SIGNAL`]: crate::transition::SCENE_LOADED_SIGNAL
    LoadScene { index: usize },

    /// 退出游戏
    Quit,

    /// 生成指定索引的角色
    SpawnCharacter { index: usize },

    /// 设置灯光强度
    SetLightIntensity { intensity: f32 },
}
