//! # Dialog Runtime
//!
//! 小游戏对话系统的核心运行时库：对话播放、场景过渡、角色选择
//! 和灯光闪烁效果。
//!
//! ## 架构概述
//!
//! `dialog-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── RuntimeInput ──────────►│
//!   │                              │ tick(dt, input)
//!   │◄─── Vec<Command> ───────────│
//!   │                              │
//! ```
//!
//! 所有组件都在单个调度线程上协作式运行：挂起点只有 tick 边界和
//! 显式建模的定时（打字间隔、结束语停留、淡入淡出），没有线程、
//! 没有协程、没有锁。
//!
//! ## 核心类型
//!
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`RuntimeInput`]：Host 向 Runtime 传递的输入
//! - [`DialogSequencer`]：单个脚本的播放器（打字动画、逐句推进）
//! - [`DialogRunner`]：按顺序编排多个 Sequencer，协调外部播放的暂停/恢复
//! - [`SceneTransition`]：淡出 → 加载 → 淡入 的场景过渡状态机
//! - [`CharacterSelect`] / [`CharacterSpawner`]：角色选择的持久化与生成
//! - [`LightFlicker`]：灯光闪烁效果
//!
//! ## 使用示例
//!
//! ```ignore
//! use dialog_runtime::{DialogRunner, DialogSequencer, DialogScript, RuntimeInput};
//!
//! let script = DialogScript::new(speaker_count, lines)?;
//! let mut runner = DialogRunner::new(vec![DialogSequencer::new(script)], "训练结束");
//!
//! // 按钮入口
//! for cmd in runner.start_from_button() {
//!     host.execute(cmd);
//! }
//!
//! // 主循环
//! loop {
//!     let input = host.poll_advance().then_some(RuntimeInput::Advance);
//!     let out = runner.tick(dt, input, None);
//!
//!     for cmd in out.commands {
//!         host.execute(cmd);
//!     }
//!     if out.finished {
//!         break;
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：RuntimeInput 定义
//! - [`script`]：对话脚本数据模型
//! - [`state`]：Sequencer 状态和 tick 输出
//! - [`sequencer`]：对话播放器
//! - [`runner`]：对话编排器
//! - [`transition`]：场景过渡
//! - [`settings`]：设置持久化
//! - [`character`]：角色选择与生成
//! - [`flicker`]：灯光闪烁
//! - [`error`]：错误类型定义

pub mod character;
pub mod command;
pub mod error;
pub mod flicker;
pub mod input;
pub mod runner;
pub mod script;
pub mod sequencer;
pub mod settings;
pub mod state;
pub mod transition;

// 重导出核心类型
pub use character::{CharacterSelect, CharacterSpawner};
pub use command::{Command, SpeakerId};
pub use error::{ConfigError, DialogError, DialogResult};
pub use flicker::LightFlicker;
pub use input::{RuntimeInput, SignalId};
pub use runner::{DEFAULT_END_HOLD, DialogRunner, PlaybackControl, PlaybackState};
pub use script::{DialogLine, DialogScript};
pub use sequencer::{DEFAULT_TYPING_INTERVAL, DialogSequencer};
pub use settings::{
    GameSettings, JsonSettingsStore, MemorySettingsStore, SETTINGS_VERSION, SettingsError,
    SettingsStore,
};
pub use state::{SequencerState, TickOutput, TypingState};
pub use transition::{
    DEFAULT_FADE_DURATION, FadePhase, SCENE_LOADED_SIGNAL, SceneTransition,
};
