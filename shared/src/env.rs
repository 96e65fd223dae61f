use std::env;

pub enum Environment {
    Development,
    Production,
}

// ENV 環境変数の値で動作環境を切り替える
// 未設定の場合はビルドプロファイルに合わせる
pub fn which() -> Environment {
    let default_env = if cfg!(debug_assertions) {
        "development"
    } else {
        "production"
    };

    match env::var("ENV") {
        Ok(v) => v.as_str().into(),
        Err(_) => default_env.into(),
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}
