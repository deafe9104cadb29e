//! # Settings 模块
//!
//! 玩家设置（角色选择）的持久化。
//!
//! ## 设计原则
//!
//! - 所有持久化数据必须可序列化（JSON）
//! - 必须有版本号，支持兼容性检测
//! - 没有已保存数据时读取返回默认设置
//!
//! ## 文件布局
//!
//! ```text
//! <data_dir>/settings.json
//! ```

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// 设置格式版本
///
/// 不兼容的格式变更时递增。
pub const SETTINGS_VERSION: u32 = 1;

/// 玩家设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// 设置格式版本
    pub version: u32,
    /// 已选择的角色索引
    pub selected_character: usize,
}

impl GameSettings {
    /// 创建指定角色的设置
    pub fn new(selected_character: usize) -> Self {
        Self {
            version: SETTINGS_VERSION,
            selected_character,
        }
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::SerializationFailed(e.to_string()))
    }

    /// 从 JSON 字符串反序列化
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = serde_json::from_str(json)
            .map_err(|e| SettingsError::DeserializationFailed(e.to_string()))?;

        // 检查版本兼容性
        if settings.version != SETTINGS_VERSION {
            return Err(SettingsError::IncompatibleVersion {
                found: settings.version,
                current: SETTINGS_VERSION,
            });
        }

        Ok(settings)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(0)
    }
}

/// 设置错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// 序列化失败
    SerializationFailed(String),
    /// 反序列化失败
    DeserializationFailed(String),
    /// 版本不兼容
    IncompatibleVersion { found: u32, current: u32 },
    /// 文件操作失败
    IoError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::SerializationFailed(e) => write!(f, "序列化失败: {}", e),
            SettingsError::DeserializationFailed(e) => write!(f, "反序列化失败: {}", e),
            SettingsError::IncompatibleVersion { found, current } => {
                write!(f, "设置版本不兼容: 文件版本 {} vs 当前版本 {}", found, current)
            }
            SettingsError::IoError(e) => write!(f, "文件操作失败: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// 设置存取接口
///
/// ## 读写契约
///
/// - `load`：没有已保存数据时返回 [`GameSettings::default`]；
///   数据存在但损坏/不兼容时返回错误
/// - `save`：整体覆盖写入
pub trait SettingsStore {
    /// 读取设置
    fn load(&self) -> Result<GameSettings, SettingsError>;

    /// 保存设置
    fn save(&self, settings: &GameSettings) -> Result<(), SettingsError>;
}

/// JSON 文件存取
pub struct JsonSettingsStore {
    /// 设置文件路径
    path: PathBuf,
}

impl JsonSettingsStore {
    /// 创建文件存取器
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 设置文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<GameSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(GameSettings::default());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::IoError(format!("无法读取设置文件: {}", e)))?;

        GameSettings::from_json(&json)
    }

    fn save(&self, settings: &GameSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::IoError(format!("无法创建设置目录: {}", e)))?;
            }
        }

        let json = settings.to_json()?;

        let mut file = File::create(&self.path)
            .map_err(|e| SettingsError::IoError(format!("无法创建设置文件: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SettingsError::IoError(format!("无法写入设置文件: {}", e)))?;

        Ok(())
    }
}

/// 内存存取（无盘 Host 与测试用）
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: RefCell<Option<GameSettings>>,
}

impl MemorySettingsStore {
    /// 创建空的内存存取器
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<GameSettings, SettingsError> {
        Ok(self.inner.borrow().clone().unwrap_or_default())
    }

    fn save(&self, settings: &GameSettings) -> Result<(), SettingsError> {
        *self.inner.borrow_mut() = Some(settings.clone());
        Ok(())
    }
}
