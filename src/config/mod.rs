/// 서비스 설정
/// 1. 코드 기본값
/// 2. config/{environment}.toml (선택)
/// 3. MARKET__ 접두사 환경 변수 (예: MARKET__DATABASE__URL)
// region:    --- Imports
use config::{ConfigError, Environment, File};
use serde::Deserialize;

// endregion: --- Imports

// region:    --- Config Model
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// 실행 환경 (development, production)
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 요청 바디 최대 크기 (MB), 이미지 업로드 기준
    pub body_limit_mb: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// true 이면 기동 시 모든 테이블을 삭제 후 재생성
    pub recreate: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// 인증 서버가 세션 토큰(HS256)을 서명할 때 쓰는 비밀 키
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// 외부 이미지 호스팅 업로드 엔드포인트, 비어 있으면 업로드 비활성
    pub upload_url: String,
    pub api_key: String,
    pub folder: String,
}

// endregion: --- Config Model

// region:    --- Loading
impl Config {
    /// 설정 로드
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MARKET_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.body_limit_mb", 20)?
            .set_default("database.max_connections", 5)?
            .set_default("database.recreate", false)?
            .set_default("media.upload_url", "")?
            .set_default("media.api_key", "")?
            .set_default("media.folder", "farm-market")?;

        // 기존 배포 환경과의 호환: DATABASE_URL 은 가장 낮은 우선순위
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }
        if environment == "development" {
            builder = builder.set_default("auth.jwt_secret", "development-secret-key")?;
        }

        builder
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("MARKET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 서버 바인드 주소
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 바디 제한 (bytes)
    pub fn body_limit(&self) -> usize {
        self.server.body_limit_mb * 1024 * 1024
    }
}

// endregion: --- Loading

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            environment: "test".into(),
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
                body_limit_mb: 2,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/farm_market".into(),
                max_connections: 1,
                recreate: false,
            },
            auth: AuthConfig {
                jwt_secret: "secret".into(),
            },
            media: MediaConfig {
                upload_url: String::new(),
                api_key: String::new(),
                folder: "farm-market".into(),
            },
        }
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        assert_eq!(sample().bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn body_limit_is_in_bytes() {
        assert_eq!(sample().body_limit(), 2 * 1024 * 1024);
    }
}
