//! Business logic services

pub mod assets;
pub mod audit;
pub mod backup;
pub mod checks;
pub mod export;
pub mod loans;
pub mod maintenance;
pub mod notifier;
pub mod settings;
pub mod stats;
pub mod users;
pub mod visibility;

use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;

use crate::{config::AuthConfig, repository::Repository};

use notifier::Notifier;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub audit: audit::AuditService,
    pub backup: backup::BackupService,
    pub checks: checks::ChecksService,
    pub loans: loans::LoansService,
    pub maintenance: maintenance::MaintenanceService,
    pub settings: settings::SettingsService,
    pub stats: stats::StatsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository and notification sink
    pub fn new(repository: Repository, auth_config: AuthConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            assets: assets::AssetsService::new(repository.clone()),
            audit: audit::AuditService::new(repository.clone()),
            backup: backup::BackupService::new(repository.clone()),
            checks: checks::ChecksService::new(repository.clone(), notifier.clone()),
            loans: loans::LoansService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone(), notifier),
            settings: settings::SettingsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
        }
    }
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Record id with a random numeric suffix, e.g. `EQ-0042` or `MT-42`
pub(crate) fn generate_id(prefix: &str, zero_padded: bool) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..10_000);
    if zero_padded {
        format!("{}-{:04}", prefix, n)
    } else {
        format!("{}-{}", prefix, n)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::{
        models::{asset::AssetInput, AssetStatus, Role, UserClaims},
        repository::{LocalStore, Repository, SettingsStore},
    };

    pub struct TestContext {
        pub repository: Repository,
        _dir: tempfile::TempDir,
    }

    async fn build(sample_data: bool) -> TestContext {
        let dir = tempfile::tempdir().unwrap();
        let local = Arc::new(
            LocalStore::open(dir.path())
                .await
                .unwrap()
                .with_sample_data(sample_data),
        );
        let settings = SettingsStore::load(local.clone(), None).await.unwrap();
        TestContext {
            repository: Repository::new(local, reqwest::Client::new(), settings),
            _dir: dir,
        }
    }

    /// Empty local store
    pub async fn context() -> TestContext {
        build(false).await
    }

    /// Local store holding the built-in sample records
    pub async fn sample_context() -> TestContext {
        build(true).await
    }

    pub async fn add_asset(
        repository: &Repository,
        id: &str,
        department: &str,
        status: AssetStatus,
        next_pm_date: Option<NaiveDate>,
    ) {
        let asset = AssetInput {
            name: format!("Asset {}", id),
            serial_number: format!("SN-{}", id),
            department: department.into(),
            status: Some(status),
            next_pm_date,
            ..Default::default()
        }
        .into_asset(id.into());
        repository.assets_create(&asset).await.unwrap();
    }

    fn claims(sub: &str, role: Role, department: Option<&str>) -> UserClaims {
        UserClaims {
            sub: sub.into(),
            role,
            department: department.map(String::from),
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        }
    }

    /// Serve a stub HTTP endpoint on a random local port
    pub async fn serve(router: axum::Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    pub fn admin() -> UserClaims {
        claims("admin", Role::Admin, None)
    }

    pub fn staff(department: &str) -> UserClaims {
        claims("staff", Role::Staff, Some(department))
    }
}
