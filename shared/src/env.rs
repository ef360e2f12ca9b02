use std::env;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

pub fn which() -> Environment {
    let default_env = if cfg!(debug_assertions) {
        "development"
    } else {
        "production"
    };

    match env::var("ENV")
        .unwrap_or_else(|_| default_env.to_string())
        .as_str()
    {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}
