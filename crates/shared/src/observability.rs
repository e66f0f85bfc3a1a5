//! # Observability 基盤
//!
//! トレーシング初期化とリクエストスパンの生成を提供する。
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応する。

/// ログ出力形式
///
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// subscriber 初期化前に呼ばれるため、警告は stderr に直接出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|val| Self::parse(&val))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// デフォルトのフィルタ（`RUST_LOG` 未設定時に使用）
    pub default_filter: String,
    pub log_format:     LogFormat,
}

impl TracingConfig {
    pub fn new(default_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            default_filter: default_filter.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    ///
    /// フィルタのデフォルトは `"info,kagi=debug"`。
    pub fn from_env() -> Self {
        Self::new("info,kagi=debug", LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// `ErrorLayer` を登録し、`InfraError` の SpanTrace が記録されるようにする。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_filter.clone().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// HTTP リクエスト用のスパンを作成する
///
/// `TraceLayer::make_span_with` に渡して使う。
/// クエリ文字列は含めない（パスのみ記録する）。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        http.method = %request.method(),
        http.path = %request.uri().path(),
        http.version = ?request.version(),
    )
}
