//! # Flicker 模块
//!
//! 灯光闪烁效果：亮度按正弦波在最小/最大值之间摆动。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// 默认闪烁速度（弧度/秒）
pub const DEFAULT_FLICKER_SPEED: f32 = 5.0;

/// 默认最小亮度
pub const DEFAULT_MIN_INTENSITY: f32 = 0.3;

/// 默认最大亮度
pub const DEFAULT_MAX_INTENSITY: f32 = 1.0;

/// 灯光闪烁状态机
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightFlicker {
    /// 闪烁速度（弧度/秒）
    pub speed: f32,
    /// 最小亮度
    pub min_intensity: f32,
    /// 最大亮度
    pub max_intensity: f32,
    /// 累计时间（秒）
    elapsed: f32,
}

impl LightFlicker {
    /// 创建闪烁效果（默认参数）
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_FLICKER_SPEED,
            min_intensity: DEFAULT_MIN_INTENSITY,
            max_intensity: DEFAULT_MAX_INTENSITY,
            elapsed: 0.0,
        }
    }

    /// 设置亮度范围
    pub fn with_range(mut self, min_intensity: f32, max_intensity: f32) -> Self {
        self.min_intensity = min_intensity;
        self.max_intensity = max_intensity;
        self
    }

    /// 设置闪烁速度
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// 核心驱动函数
    pub fn tick(&mut self, dt: Duration) -> Command {
        self.elapsed += dt.as_secs_f32();

        let t = ((self.elapsed * self.speed).sin() + 1.0) * 0.5;
        let intensity = self.min_intensity + (self.max_intensity - self.min_intensity) * t;

        Command::SetLightIntensity { intensity }
    }
}

impl Default for LightFlicker {
    fn default() -> Self {
        Self::new()
    }
}
