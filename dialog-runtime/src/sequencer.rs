//! # Sequencer 模块
//!
//! 单个脚本的播放器：把一组说话者的台词按顺序播放到结束。
//!
//! ## 执行模型
//!
//! ```text
//! tick(dt, input) -> TickOutput { commands, finished }
//! ```
//!
//! 1. 激活 tick：重置所有说话者 UI；按配置自动开始第一条台词
//! 2. 收到 `Advance`：打断打字 / 推进到下一条台词 / 结束
//! 3. 无输入：按 `dt` 推进打字动画
//!
//! ## 打字动画
//!
//! 打字由 `dt` 驱动的显式状态机实现，每经过一个 `typing_interval`
//! 多显示一个字符。打断时先清空 [`TypingState`] 再写入全文，之后的
//! tick 不会再产生任何残余的部分文本写入。
//!
//! 打断打字的 tick 返回"未结束"：调用方需要再发一次 `Advance`
//! 才会真正推进到下一条台词。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{Command, SpeakerId};
use crate::input::RuntimeInput;
use crate::script::{DialogLine, DialogScript};
use crate::state::{SequencerState, TickOutput, TypingState};

/// 默认打字速度：每个字符的显示间隔
pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_millis(100);

/// 对话播放器
///
/// # 使用示例
///
/// ```ignore
/// let script = DialogScript::new(2, lines)?;
/// let mut sequencer = DialogSequencer::new(script);
///
/// loop {
///     let out = sequencer.tick(dt, input);
///
///     // Host 执行 out.commands...
///
///     if out.finished {
///         break;
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogSequencer {
    /// 播放脚本
    script: DialogScript,
    /// 激活时是否自动开始第一条台词
    auto_start: bool,
    /// 打字动画的字符间隔
    typing_interval: Duration,
    /// 运行时状态
    state: SequencerState,
}

impl DialogSequencer {
    /// 创建新的播放器（自动开始，默认打字速度）
    pub fn new(script: DialogScript) -> Self {
        Self {
            script,
            auto_start: true,
            typing_interval: DEFAULT_TYPING_INTERVAL,
            state: SequencerState::default(),
        }
    }

    /// 设置激活时是否自动开始第一条台词
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// 设置打字动画的字符间隔
    pub fn with_typing_interval(mut self, interval: Duration) -> Self {
        self.typing_interval = interval;
        self
    }

    /// 当前运行时状态
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// 重置到未激活状态，供下一次运行使用
    pub fn reset(&mut self) {
        self.state = SequencerState::default();
    }

    /// 核心驱动函数
    ///
    /// 每个调度 tick 调用一次。`input` 中的 `Advance` 是离散的边沿
    /// 事件，每 tick 至多消费一个。
    ///
    /// # 返回
    ///
    /// `finished = true` 表示整个脚本播放完毕，所有相关 UI 已隐藏。
    pub fn tick(&mut self, dt: Duration, input: Option<RuntimeInput>) -> TickOutput {
        // 激活 tick 只做初始化，不再消费本 tick 的输入
        if !self.state.started {
            return self.activate();
        }

        match input {
            Some(RuntimeInput::Advance) => self.handle_advance(),
            // Signal 与 Sequencer 无关，等同于无输入
            _ => {
                let mut commands = Vec::new();
                self.advance_typing(dt, &mut commands);
                TickOutput::running(commands)
            }
        }
    }

    /// 激活：重置说话者 UI；空脚本立即结束
    fn activate(&mut self) -> TickOutput {
        self.state.started = true;

        let mut commands = Vec::new();
        self.reset_visuals(&mut commands);

        if self.script.is_empty() {
            self.hide_all(&mut commands);
            return TickOutput::finished(commands);
        }

        if self.auto_start {
            self.next_line(&mut commands);
        }

        TickOutput::running(commands)
    }

    /// 处理一次 `Advance` 输入
    fn handle_advance(&mut self) -> TickOutput {
        let mut commands = Vec::new();

        // 打字进行中：打断并立即显示全文。typing 必须先清空再写全文，
        // 这样之后的 tick 不会再写入过期的部分文本。
        if self.state.typing.is_some() {
            self.state.typing = None;
            if let Some(line) = self.current_line() {
                let speaker = self.state.current_speaker;
                let text = line.text.clone();
                commands.push(Command::SetDialogueText { speaker, text });
                commands.push(Command::SetArrowVisible {
                    speaker,
                    visible: true,
                });
            }
            return TickOutput::running(commands);
        }

        // 还有台词：推进到下一条
        let next = self.state.current_line.map_or(0, |index| index + 1);
        if next < self.script.len() {
            self.next_line(&mut commands);
            return TickOutput::running(commands);
        }

        // 没有台词了：隐藏所有说话者的 UI 和立绘，结束
        self.hide_all(&mut commands);
        TickOutput::finished(commands)
    }

    /// 推进到下一条台词并开始打字
    fn next_line(&mut self, commands: &mut Vec<Command>) {
        // 收起上一个说话者的对话 UI
        if self.state.current_line.is_some() {
            self.dim_speaker(self.state.current_speaker, commands);
        }

        let index = self.state.current_line.map_or(0, |index| index + 1);
        let Some(line) = self.script.get(index) else {
            return;
        };
        let speaker = line.speaker;
        let name = line.name.clone();

        self.state.current_line = Some(index);
        self.state.current_speaker = speaker;

        commands.push(Command::ShowSpeakerChrome { speaker });
        commands.push(Command::SetArrowVisible {
            speaker,
            visible: false,
        });
        commands.push(Command::SetPortraitDimmed {
            speaker,
            dimmed: false,
        });
        commands.push(Command::SetSpeakerName { speaker, name });
        commands.push(Command::SetDialogueText {
            speaker,
            text: String::new(),
        });

        self.state.typing = Some(TypingState::start());
    }

    /// 按外部时钟推进打字动画
    fn advance_typing(&mut self, dt: Duration, commands: &mut Vec<Command>) {
        if self.state.typing.is_none() {
            return;
        }
        let Some(line) = self.current_line() else {
            return;
        };
        let text = line.text.clone();
        let total = text.chars().count();

        let Some(typing) = self.state.typing.as_mut() else {
            return;
        };
        typing.elapsed += dt;

        let before = typing.revealed;
        while typing.elapsed >= self.typing_interval && typing.revealed < total {
            typing.elapsed -= self.typing_interval;
            typing.revealed += 1;
        }
        let revealed = typing.revealed;

        let speaker = self.state.current_speaker;
        if revealed >= total {
            // 自然完成：显示全文和完成箭头
            self.state.typing = None;
            commands.push(Command::SetDialogueText { speaker, text });
            commands.push(Command::SetArrowVisible {
                speaker,
                visible: true,
            });
        } else if revealed > before {
            let partial: String = text.chars().take(revealed).collect();
            commands.push(Command::SetDialogueText {
                speaker,
                text: partial,
            });
        }
    }

    /// 当前台词
    fn current_line(&self) -> Option<&DialogLine> {
        self.state
            .current_line
            .and_then(|index| self.script.get(index))
    }

    /// 收起某个说话者的对话 UI 并压暗立绘
    fn dim_speaker(&self, speaker: SpeakerId, commands: &mut Vec<Command>) {
        commands.push(Command::HideSpeakerChrome { speaker });
        commands.push(Command::SetArrowVisible {
            speaker,
            visible: false,
        });
        commands.push(Command::SetPortraitDimmed {
            speaker,
            dimmed: true,
        });
    }

    /// 激活时的 UI 复位：对话 UI 全部隐藏，立绘全部显示为压暗状态
    fn reset_visuals(&self, commands: &mut Vec<Command>) {
        for speaker in 0..self.script.speaker_count() {
            self.dim_speaker(speaker, commands);
            commands.push(Command::SetPortraitVisible {
                speaker,
                visible: true,
            });
        }
    }

    /// 结束时隐藏所有说话者的对话 UI 和立绘
    fn hide_all(&self, commands: &mut Vec<Command>) {
        for speaker in 0..self.script.speaker_count() {
            self.dim_speaker(speaker, commands);
            commands.push(Command::SetPortraitVisible {
                speaker,
                visible: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::DialogLine;

    const TICK: Duration = Duration::from_millis(100);

    fn two_speaker_script() -> DialogScript {
        DialogScript::new(
            2,
            vec![
                DialogLine::new(0, "A", "Hi"),
                DialogLine::new(1, "B", "Bye"),
            ],
        )
        .unwrap()
    }

    fn advance() -> Option<RuntimeInput> {
        Some(RuntimeInput::Advance)
    }

    #[test]
    fn test_empty_script_finishes_on_first_tick() {
        let script = DialogScript::new(1, vec![]).unwrap();
        let mut sequencer = DialogSequencer::new(script);

        let out = sequencer.tick(Duration::ZERO, None);

        assert!(out.finished);
        assert!(out.commands.contains(&Command::SetPortraitVisible {
            speaker: 0,
            visible: false,
        }));
    }

    #[test]
    fn test_activation_resets_visuals_and_starts_first_line() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());

        let out = sequencer.tick(Duration::ZERO, None);

        assert!(!out.finished);
        // 复位：两个立绘都显示为压暗状态
        assert!(out.commands.contains(&Command::SetPortraitVisible {
            speaker: 1,
            visible: true,
        }));
        // 自动开始：第一条台词的说话者被点亮并开始打字
        assert!(out.commands.contains(&Command::ShowSpeakerChrome { speaker: 0 }));
        assert!(out.commands.contains(&Command::SetSpeakerName {
            speaker: 0,
            name: "A".to_string(),
        }));
        assert!(sequencer.state().typing.is_some());
        assert_eq!(sequencer.state().current_line, Some(0));
    }

    #[test]
    fn test_typing_reveals_one_char_per_interval() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        sequencer.tick(Duration::ZERO, None);

        // 一个间隔：显示 "H"
        let out = sequencer.tick(TICK, None);
        assert_eq!(
            out.commands,
            vec![Command::SetDialogueText {
                speaker: 0,
                text: "H".to_string(),
            }]
        );

        // 再一个间隔："Hi" 打完，显示全文和箭头
        let out = sequencer.tick(TICK, None);
        assert_eq!(
            out.commands,
            vec![
                Command::SetDialogueText {
                    speaker: 0,
                    text: "Hi".to_string(),
                },
                Command::SetArrowVisible {
                    speaker: 0,
                    visible: true,
                },
            ]
        );
        assert!(sequencer.state().typing.is_none());
    }

    #[test]
    fn test_advance_cancels_typing_without_finishing() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        sequencer.tick(Duration::ZERO, None);

        let out = sequencer.tick(Duration::ZERO, advance());

        assert!(!out.finished);
        assert_eq!(
            out.commands,
            vec![
                Command::SetDialogueText {
                    speaker: 0,
                    text: "Hi".to_string(),
                },
                Command::SetArrowVisible {
                    speaker: 0,
                    visible: true,
                },
            ]
        );

        // 打断之后不会再有残余的部分文本写入
        let out = sequencer.tick(TICK, None);
        assert!(out.commands.is_empty());
        assert!(!out.finished);
    }

    #[test]
    fn test_tick_without_input_is_noop_when_idle() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        sequencer.tick(Duration::ZERO, None);
        // 打完第一句
        sequencer.tick(Duration::from_secs(1), None);

        let out = sequencer.tick(TICK, None);
        assert!(out.commands.is_empty());
        assert!(!out.finished);
    }

    #[test]
    fn test_exactly_n_advances_after_activation() {
        // 2 条台词，激活后恰好 2 次 Advance 到达结束（打字均自然完成）
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        sequencer.tick(Duration::ZERO, None);
        sequencer.tick(Duration::from_secs(1), None);

        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(!out.finished);
        sequencer.tick(Duration::from_secs(1), None);

        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(out.finished);
    }

    #[test]
    fn test_full_walkthrough_with_cancellations() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());

        // 第 1 次 Advance：被激活 tick 消费，自动开始 "A" / "Hi"
        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(!out.finished);
        assert!(out.commands.contains(&Command::SetSpeakerName {
            speaker: 0,
            name: "A".to_string(),
        }));
        assert!(sequencer.state().typing.is_some());

        // 第 2 次 Advance：打断打字，显示全文 "Hi" 和箭头
        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(!out.finished);
        assert!(out.commands.contains(&Command::SetDialogueText {
            speaker: 0,
            text: "Hi".to_string(),
        }));
        assert!(out.commands.contains(&Command::SetArrowVisible {
            speaker: 0,
            visible: true,
        }));

        // 第 3 次 Advance：推进到 "B" / "Bye"
        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(!out.finished);
        assert!(out.commands.contains(&Command::HideSpeakerChrome { speaker: 0 }));
        assert!(out.commands.contains(&Command::ShowSpeakerChrome { speaker: 1 }));
        assert!(out.commands.contains(&Command::SetSpeakerName {
            speaker: 1,
            name: "B".to_string(),
        }));

        // 第 4 次 Advance：打断 "Bye" 的打字
        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(!out.finished);
        assert!(out.commands.contains(&Command::SetDialogueText {
            speaker: 1,
            text: "Bye".to_string(),
        }));

        // 第 5 次 Advance：全部隐藏并结束
        let out = sequencer.tick(Duration::ZERO, advance());
        assert!(out.finished);
        assert!(out.commands.contains(&Command::SetPortraitVisible {
            speaker: 0,
            visible: false,
        }));
        assert!(out.commands.contains(&Command::SetPortraitVisible {
            speaker: 1,
            visible: false,
        }));
    }

    #[test]
    fn test_manual_start() {
        let mut sequencer = DialogSequencer::new(two_speaker_script()).with_auto_start(false);

        // 激活只复位 UI，不开始台词
        let out = sequencer.tick(Duration::ZERO, None);
        assert!(!out.finished);
        assert_eq!(sequencer.state().current_line, None);

        // 第一次 Advance 才开始第一条台词
        sequencer.tick(Duration::ZERO, advance());
        assert_eq!(sequencer.state().current_line, Some(0));
    }

    #[test]
    fn test_line_index_is_monotonic() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        let mut last = None;

        sequencer.tick(Duration::ZERO, None);
        for _ in 0..5 {
            sequencer.tick(Duration::ZERO, advance());
            let current = sequencer.state().current_line;
            assert!(current >= last);
            last = current;
        }
    }

    #[test]
    fn test_reset_allows_rerun() {
        let mut sequencer = DialogSequencer::new(two_speaker_script());
        sequencer.tick(Duration::ZERO, None);
        for _ in 0..4 {
            sequencer.tick(Duration::ZERO, advance());
        }
        assert!(sequencer.tick(Duration::ZERO, advance()).finished);

        sequencer.reset();
        assert!(!sequencer.state().started);

        // 重新激活后从头播放
        let out = sequencer.tick(Duration::ZERO, None);
        assert!(!out.finished);
        assert_eq!(sequencer.state().current_line, Some(0));
    }

    #[test]
    fn test_unicode_typing() {
        let script =
            DialogScript::new(1, vec![DialogLine::new(0, "旁白", "你好")]).unwrap();
        let mut sequencer = DialogSequencer::new(script);
        sequencer.tick(Duration::ZERO, None);

        let out = sequencer.tick(TICK, None);
        assert_eq!(
            out.commands,
            vec![Command::SetDialogueText {
                speaker: 0,
                text: "你".to_string(),
            }]
        );
    }
}
