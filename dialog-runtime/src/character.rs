//! # Character 模块
//!
//! 角色选择与进入场景后的角色生成。
//!
//! 选择结果通过 [`SettingsStore`] 持久化；场景切换由注入的
//! [`SceneTransition`] 执行，不经过任何全局单例。

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::settings::{SettingsError, SettingsStore};
use crate::transition::SceneTransition;

/// 角色选择入口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSelect {
    /// 选择完成后要切换到的场景索引
    pub next_scene: usize,
}

impl CharacterSelect {
    /// 创建角色选择入口
    pub fn new(next_scene: usize) -> Self {
        Self { next_scene }
    }

    /// 持久化所选角色并开始淡出切场景
    pub fn select(
        &self,
        character: usize,
        store: &dyn SettingsStore,
        transition: &mut SceneTransition,
    ) -> Result<(), SettingsError> {
        let mut settings = store.load()?;
        settings.selected_character = character;
        store.save(&settings)?;

        transition.begin_scene_change(self.next_scene);
        Ok(())
    }
}

/// 根据持久化的选择生成角色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSpawner {
    /// 可生成的角色数量
    pub roster_size: usize,
}

impl CharacterSpawner {
    /// 创建生成器
    pub fn new(roster_size: usize) -> Self {
        Self { roster_size }
    }

    /// 读取所选角色并产生生成指令
    ///
    /// 索引越界或设置读取失败时回退到 0 号角色；roster 为空时不生成。
    pub fn spawn_selected(&self, store: &dyn SettingsStore) -> Option<Command> {
        if self.roster_size == 0 {
            return None;
        }

        let selected = store
            .load()
            .map(|settings| settings.selected_character)
            .unwrap_or(0);
        let index = if selected < self.roster_size {
            selected
        } else {
            0
        };

        Some(Command::SpawnCharacter { index })
    }
}
