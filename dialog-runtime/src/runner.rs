//! # Runner 模块
//!
//! 按配置顺序驱动多个 [`DialogSequencer`] 到结束，显示结束语，
//! 并与外部播放源（过场时间轴等）协调暂停/恢复。
//!
//! ## 执行模型
//!
//! ```text
//! start_from_playback / start_from_button
//!   Running    ── 逐个驱动 Sequencer，每个 tick 透传输入 ──►
//!   EndMessage ── 显示结束语，停留 end_hold ──►
//!   Idle       ── 收起面板，必要时恢复外部播放
//! ```
//!
//! 一个 Sequencer 结束后，下一个从下一 tick 开始激活。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::input::RuntimeInput;
use crate::sequencer::DialogSequencer;
use crate::state::TickOutput;

/// 外部播放源的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// 播放中
    Playing,
    /// 已暂停
    Paused,
}

/// 外部播放源的控制接口
///
/// 由 Host 实现并在调用时注入，Runner 不持有全局单例。
pub trait PlaybackControl {
    /// 暂停播放
    fn pause(&mut self);

    /// 恢复播放
    fn resume(&mut self);

    /// 查询当前状态
    fn state(&self) -> PlaybackState;
}

/// 默认结束语停留时长
pub const DEFAULT_END_HOLD: Duration = Duration::from_secs(2);

/// Runner 所处阶段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum RunnerPhase {
    /// 未运行
    Idle,
    /// 正在驱动第 `cursor` 个 Sequencer
    Running { cursor: usize },
    /// 显示结束语，`remaining` 倒数到零后收起面板
    EndMessage { remaining: Duration },
}

/// 对话编排器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogRunner {
    /// 按播放顺序排列的 Sequencer 列表
    sequencers: Vec<DialogSequencer>,
    /// 全部播放完后显示的结束语
    end_text: String,
    /// 结束语停留时长
    end_hold: Duration,
    /// 当前阶段
    phase: RunnerPhase,
    /// 结束时是否需要恢复外部播放
    resume_playback: bool,
}

impl DialogRunner {
    /// 创建新的编排器
    pub fn new(sequencers: Vec<DialogSequencer>, end_text: impl Into<String>) -> Self {
        Self {
            sequencers,
            end_text: end_text.into(),
            end_hold: DEFAULT_END_HOLD,
            phase: RunnerPhase::Idle,
            resume_playback: false,
        }
    }

    /// 设置结束语停留时长
    pub fn with_end_hold(mut self, hold: Duration) -> Self {
        self.end_hold = hold;
        self
    }

    /// 是否正在运行
    pub fn is_active(&self) -> bool {
        self.phase != RunnerPhase::Idle
    }

    /// 从暂停的外部播放进入对话
    ///
    /// 暂停播放源并显示对话面板。对话结束时若播放源仍处于暂停状态，
    /// 则恢复播放。
    pub fn start_from_playback(&mut self, playback: &mut dyn PlaybackControl) -> Vec<Command> {
        playback.pause();
        self.resume_playback = true;

        let mut commands = vec![Command::ShowDialogPanel];
        commands.extend(self.start_core());
        commands
    }

    /// 由按钮等直接入口进入对话，不做播放协调
    pub fn start_from_button(&mut self) -> Vec<Command> {
        self.resume_playback = false;
        self.start_core()
    }

    /// 两个入口共用的启动流程
    fn start_core(&mut self) -> Vec<Command> {
        for sequencer in &mut self.sequencers {
            sequencer.reset();
        }
        self.phase = RunnerPhase::Running { cursor: 0 };
        vec![Command::HideStatusText]
    }

    /// 核心驱动函数
    ///
    /// `playback` 只在结束 tick 用于恢复判定，平时可传 `None`。
    /// 未运行时是无操作。
    ///
    /// # 返回
    ///
    /// `finished = true` 表示整场对话在本 tick 收尾完毕。
    pub fn tick(
        &mut self,
        dt: Duration,
        input: Option<RuntimeInput>,
        playback: Option<&mut dyn PlaybackControl>,
    ) -> TickOutput {
        let mut commands = Vec::new();

        match self.phase.clone() {
            RunnerPhase::Idle => TickOutput::running(commands),

            RunnerPhase::Running { cursor } => {
                match self.sequencers.get_mut(cursor) {
                    Some(sequencer) => {
                        let out = sequencer.tick(dt, input);
                        commands.extend(out.commands);
                        if out.finished {
                            self.finish_sequencer(cursor, &mut commands);
                        }
                    }
                    // 空的 Sequencer 列表：直接进入结束语
                    None => self.show_end_message(&mut commands),
                }
                TickOutput::running(commands)
            }

            RunnerPhase::EndMessage { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    commands.push(Command::HideDialogPanel);
                    if self.resume_playback {
                        if let Some(playback) = playback {
                            // 只有仍处于暂停时才恢复
                            if playback.state() == PlaybackState::Paused {
                                playback.resume();
                            }
                        }
                    }
                    self.phase = RunnerPhase::Idle;
                    TickOutput::finished(commands)
                } else {
                    self.phase = RunnerPhase::EndMessage { remaining };
                    TickOutput::running(commands)
                }
            }
        }
    }

    /// 一个 Sequencer 播放完毕后的推进
    fn finish_sequencer(&mut self, cursor: usize, commands: &mut Vec<Command>) {
        let next = cursor + 1;
        if next < self.sequencers.len() {
            // 下一个 Sequencer 从下一 tick 开始激活
            self.phase = RunnerPhase::Running { cursor: next };
        } else {
            self.show_end_message(commands);
        }
    }

    /// 显示结束语并开始停留倒数
    fn show_end_message(&mut self, commands: &mut Vec<Command>) {
        commands.push(Command::ShowStatusText {
            text: self.end_text.clone(),
        });
        self.phase = RunnerPhase::EndMessage {
            remaining: self.end_hold,
        };
    }
}
