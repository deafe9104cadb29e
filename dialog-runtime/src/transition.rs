//! # Transition 模块
//!
//! 场景切换：淡出 → 异步加载 → 淡入 的显式状态机。
//!
//! ## 与 Host 的协作
//!
//! ```text
//! begin_scene_change(n)
//!   FadingOut ── SetFadeAlpha(0→1) ──► SetFadeAlpha(1) + LoadScene { n }
//!   Loading   ◄── Host 加载场景，完成后发送 scene_loaded 信号
//!   FadingIn  ── SetFadeAlpha(1→0) ──► Idle
//! ```
//!
//! 没有全局单例：需要切场景的调用方持有 [`SceneTransition`] 的引用。
//! `scene_loaded` 也可以在 `Idle` 状态直接调用，Host 用它做首个场景
//! 的初始淡入。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::input::RuntimeInput;

/// Host 在场景加载完成后发送的信号
pub const SCENE_LOADED_SIGNAL: &str = "scene_loaded";

/// 默认淡入/淡出时长
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_secs(1);

/// 场景过渡阶段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadePhase {
    /// 空闲
    Idle,
    /// 淡出中（透明 → 全黑）
    FadingOut { elapsed: Duration, target: usize },
    /// 等待 Host 完成场景加载
    Loading { target: usize },
    /// 淡入中（全黑 → 透明）
    FadingIn { elapsed: Duration },
}

/// 场景过渡状态机
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTransition {
    /// 淡出时长
    fade_out: Duration,
    /// 淡入时长
    fade_in: Duration,
    /// 当前阶段
    phase: FadePhase,
}

impl SceneTransition {
    /// 创建过渡状态机（默认时长）
    pub fn new() -> Self {
        Self {
            fade_out: DEFAULT_FADE_DURATION,
            fade_in: DEFAULT_FADE_DURATION,
            phase: FadePhase::Idle,
        }
    }

    /// 指定淡出/淡入时长
    pub fn with_durations(fade_out: Duration, fade_in: Duration) -> Self {
        Self {
            fade_out,
            fade_in,
            phase: FadePhase::Idle,
        }
    }

    /// 当前阶段
    pub fn phase(&self) -> &FadePhase {
        &self.phase
    }

    /// 是否正在过渡中
    pub fn is_fading(&self) -> bool {
        self.phase != FadePhase::Idle
    }

    /// 请求淡出并切换到指定场景
    ///
    /// 过渡进行中的重复请求被忽略。
    pub fn begin_scene_change(&mut self, scene: usize) {
        if self.is_fading() {
            return;
        }
        self.phase = FadePhase::FadingOut {
            elapsed: Duration::ZERO,
            target: scene,
        };
    }

    /// 场景加载完成：遮罩置为全黑并开始淡入
    pub fn scene_loaded(&mut self) -> Vec<Command> {
        self.phase = FadePhase::FadingIn {
            elapsed: Duration::ZERO,
        };
        vec![Command::SetFadeAlpha { alpha: 1.0 }]
    }

    /// 退出游戏，不做淡出
    pub fn quit(&self) -> Command {
        Command::Quit
    }

    /// 核心驱动函数
    ///
    /// `Loading` 阶段由 [`SCENE_LOADED_SIGNAL`] 信号解除，其余输入忽略。
    pub fn tick(&mut self, dt: Duration, input: Option<RuntimeInput>) -> Vec<Command> {
        let mut commands = Vec::new();

        match self.phase.clone() {
            FadePhase::Idle => {}

            FadePhase::FadingOut { elapsed, target } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.fade_out {
                    commands.push(Command::SetFadeAlpha { alpha: 1.0 });
                    commands.push(Command::LoadScene { index: target });
                    self.phase = FadePhase::Loading { target };
                } else {
                    let alpha = elapsed.as_secs_f32() / self.fade_out.as_secs_f32();
                    commands.push(Command::SetFadeAlpha { alpha });
                    self.phase = FadePhase::FadingOut { elapsed, target };
                }
            }

            FadePhase::Loading { .. } => {
                if let Some(RuntimeInput::Signal { id }) = input {
                    if id == SCENE_LOADED_SIGNAL {
                        commands.extend(self.scene_loaded());
                    }
                }
            }

            FadePhase::FadingIn { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.fade_in {
                    commands.push(Command::SetFadeAlpha { alpha: 0.0 });
                    self.phase = FadePhase::Idle;
                } else {
                    let alpha = 1.0 - elapsed.as_secs_f32() / self.fade_in.as_secs_f32();
                    commands.push(Command::SetFadeAlpha { alpha });
                    self.phase = FadePhase::FadingIn { elapsed };
                }
            }
        }

        commands
    }
}

impl Default for SceneTransition {
    fn default() -> Self {
        Self::new()
    }
}
