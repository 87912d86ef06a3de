use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// 规则阈值 - standing engine thresholds
///
/// Every number the standing rules compare against lives here so callers
/// can tune them without touching rule code. Percentages are expressed as
/// whole numbers (10.0 = 10%).
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | VIP_SPEND_THRESHOLD | 100.0 | 升级 VIP 的累计消费 |
/// | VIP_ORDER_THRESHOLD | 3 | 无投诉升级 VIP 的订单数 |
/// | VIP_DOWNGRADE_WARNINGS | 2 | VIP 降级警告数 |
/// | DEREGISTER_WARNINGS | 3 | 注销并拉黑的警告数 |
/// | DEMOTION_RATING | 2.0 | 平均评分低于此值降职 |
/// | DEMOTION_COMPLAINTS | 3 | 投诉数达到此值降职 |
/// | BONUS_RATING | 4.0 | 平均评分高于此值奖金 |
/// | BONUS_COMPLIMENTS | 3 | 表扬数达到此值奖金 |
/// | DEMOTIONS_BEFORE_FIRING | 2 | 降职次数达到此值解雇 |
/// | DEMOTION_PAY_CUT_PERCENT | 10.0 | 降职减薪比例 |
/// | BONUS_RAISE_PERCENT | 10.0 | 奖金加薪比例 |
/// | VIP_DISCOUNT_PERCENT | 5.0 | VIP 折扣 |
/// | VIP_FREE_DELIVERY_RATIO | 3 | 每 N 单免一次配送费 |
/// | MAX_DEPOSIT | 10000.0 | 单次充值上限 |
/// | MIN_ACTIVE_STAFF | 2 | 每个岗位最少在职人数 |
#[derive(Debug, Clone, PartialEq)]
pub struct StandingConfig {
    pub vip_spend_threshold: f64,
    pub vip_order_threshold: u32,
    pub vip_downgrade_warnings: u32,
    pub deregister_warnings: u32,
    pub demotion_rating_threshold: f64,
    pub demotion_complaint_threshold: u32,
    pub bonus_rating_threshold: f64,
    pub bonus_compliment_threshold: u32,
    pub demotions_before_firing: u32,
    pub demotion_pay_cut_percent: f64,
    pub bonus_raise_percent: f64,
    pub vip_discount_percent: f64,
    pub vip_free_delivery_ratio: u32,
    pub max_deposit: f64,
    pub min_active_staff: u32,
    pub default_chef_pay: f64,
    pub default_delivery_pay: f64,
}

impl Default for StandingConfig {
    fn default() -> Self {
        Self {
            vip_spend_threshold: 100.0,
            vip_order_threshold: 3,
            vip_downgrade_warnings: 2,
            deregister_warnings: 3,
            demotion_rating_threshold: 2.0,
            demotion_complaint_threshold: 3,
            bonus_rating_threshold: 4.0,
            bonus_compliment_threshold: 3,
            demotions_before_firing: 2,
            demotion_pay_cut_percent: 10.0,
            bonus_raise_percent: 10.0,
            vip_discount_percent: 5.0,
            vip_free_delivery_ratio: 3,
            max_deposit: 10_000.0,
            min_active_staff: 2,
            default_chef_pay: 5_000.0,
            default_delivery_pay: 3_000.0,
        }
    }
}

/// Rejected configuration value
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid config value for {field}: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl StandingConfig {
    /// 从环境变量加载阈值，未设置时使用默认值
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            vip_spend_threshold: env_or("VIP_SPEND_THRESHOLD", d.vip_spend_threshold),
            vip_order_threshold: env_or("VIP_ORDER_THRESHOLD", d.vip_order_threshold),
            vip_downgrade_warnings: env_or("VIP_DOWNGRADE_WARNINGS", d.vip_downgrade_warnings),
            deregister_warnings: env_or("DEREGISTER_WARNINGS", d.deregister_warnings),
            demotion_rating_threshold: env_or("DEMOTION_RATING", d.demotion_rating_threshold),
            demotion_complaint_threshold: env_or(
                "DEMOTION_COMPLAINTS",
                d.demotion_complaint_threshold,
            ),
            bonus_rating_threshold: env_or("BONUS_RATING", d.bonus_rating_threshold),
            bonus_compliment_threshold: env_or("BONUS_COMPLIMENTS", d.bonus_compliment_threshold),
            demotions_before_firing: env_or("DEMOTIONS_BEFORE_FIRING", d.demotions_before_firing),
            demotion_pay_cut_percent: env_or(
                "DEMOTION_PAY_CUT_PERCENT",
                d.demotion_pay_cut_percent,
            ),
            bonus_raise_percent: env_or("BONUS_RAISE_PERCENT", d.bonus_raise_percent),
            vip_discount_percent: env_or("VIP_DISCOUNT_PERCENT", d.vip_discount_percent),
            vip_free_delivery_ratio: env_or("VIP_FREE_DELIVERY_RATIO", d.vip_free_delivery_ratio),
            max_deposit: env_or("MAX_DEPOSIT", d.max_deposit),
            min_active_staff: env_or("MIN_ACTIVE_STAFF", d.min_active_staff),
            default_chef_pay: env_or("DEFAULT_CHEF_PAY", d.default_chef_pay),
            default_delivery_pay: env_or("DEFAULT_DELIVERY_PAY", d.default_delivery_pay),
        }
    }

    /// Reject values the rules cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let money = [
            ("vip_spend_threshold", self.vip_spend_threshold),
            ("max_deposit", self.max_deposit),
            ("default_chef_pay", self.default_chef_pay),
            ("default_delivery_pay", self.default_delivery_pay),
        ];
        for (field, value) in money {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::new(field, format!("must be >= 0, got {value}")));
            }
        }

        let percents = [
            ("demotion_pay_cut_percent", self.demotion_pay_cut_percent),
            ("bonus_raise_percent", self.bonus_raise_percent),
            ("vip_discount_percent", self.vip_discount_percent),
        ];
        for (field, value) in percents {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::new(
                    field,
                    format!("must be within 0..=100, got {value}"),
                ));
            }
        }

        let ratings = [
            ("demotion_rating_threshold", self.demotion_rating_threshold),
            ("bonus_rating_threshold", self.bonus_rating_threshold),
        ];
        for (field, value) in ratings {
            if !value.is_finite() || !(0.0..=5.0).contains(&value) {
                return Err(ConfigError::new(
                    field,
                    format!("must be within 0..=5, got {value}"),
                ));
            }
        }

        let counts = [
            ("vip_downgrade_warnings", self.vip_downgrade_warnings),
            ("deregister_warnings", self.deregister_warnings),
            ("demotion_complaint_threshold", self.demotion_complaint_threshold),
            ("bonus_compliment_threshold", self.bonus_compliment_threshold),
            ("demotions_before_firing", self.demotions_before_firing),
            ("vip_free_delivery_ratio", self.vip_free_delivery_ratio),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::new(field, "must be at least 1"));
            }
        }

        Ok(())
    }
}

/// 服务配置 - process-level configuration
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/restaurant/standing | 工作目录 |
/// | STANDING_DB_FILE | standing.redb | 数据库文件名 (相对 WORK_DIR) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录，设置后按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// redb 文件名
    pub db_file: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub standing: StandingConfig,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/restaurant/standing".into()),
            db_file: std::env::var("STANDING_DB_FILE").unwrap_or_else(|_| "standing.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            standing: StandingConfig::from_env(),
        }
    }

    /// 使用自定义工作目录覆盖
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Full path of the redb database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
