pub mod domain;
pub mod estimator;
pub mod history;
pub mod market;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: u16,
        pub seed_history: bool,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let port = lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT);

            let seed_history = match lookup("PRICEWISE_SEED_HISTORY") {
                Some(v) => parse_flag(&v)
                    .with_context(|| format!("PRICEWISE_SEED_HISTORY is not a boolean: {v:?}"))?,
                None => true,
            };

            Ok(Self {
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
                port,
                seed_history,
            })
        }

        pub fn initial_history(&self) -> crate::history::HistoryBook {
            if self.seed_history {
                crate::history::HistoryBook::seeded()
            } else {
                crate::history::HistoryBook::default()
            }
        }
    }

    fn parse_flag(raw: &str) -> Option<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

}
